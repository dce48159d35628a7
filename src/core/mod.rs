//! The core of the ray tracer: geometry, transformations, the
//! interfaces shared between shapes, primitives and acceleration
//! structures, plus configuration and error types.
//!
//! - camera
//! - error
//! - geometry
//! - interaction
//! - material
//! - paramset
//! - pbrt
//! - primitive
//! - rng
//! - shape
//! - transform

pub mod camera;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod material;
pub mod paramset;
pub mod pbrt;
pub mod primitive;
pub mod rng;
pub mod shape;
pub mod transform;
