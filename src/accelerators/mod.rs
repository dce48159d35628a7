//! Acceleration structures are one of the components at the heart of
//! any ray tracer. Without algorithms to reduce the number of
//! unnecessary ray intersection tests, tracing a single ray through a
//! scene would take time linear in the number of primitives in the
//! scene, since the ray would need to be tested against each
//! primitive in turn to find the closest intersection.
//!
//! - BVHAccel
//!
//! ## Split methods
//!
//! The hierarchy can be built with one of three strategies to
//! partition the primitives of a node:
//!
//! - **SAH** (default): the surface area heuristic estimates the cost
//!   of splitting after each of 12 buckets along every axis and picks
//!   the cheapest, or creates a leaf if splitting doesn't pay off.
//! - **Middle**: splits at the midpoint of the centroid bounds along
//!   the axis of largest extent.
//! - **EqualCounts**: splits at the median centroid along the axis of
//!   largest extent.

pub mod bvh;
