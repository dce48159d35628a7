//! # rs_bvh
//!
//! [Rust][rust] crate implementing a bounding volume hierarchy (BVH)
//! for ray tracing, following the accelerator described in the [PBRT
//! book][book].
//!
//! The hierarchy itself lives in [`accelerators::bvh`]. It is built
//! over anything implementing the [`Primitive`] trait (boxes,
//! spheres, triangle meshes, instances and other hierarchies) and
//! answers nearest-hit and occlusion queries from many threads at
//! once.
//!
//! The main render loop, used to look at the results, can be found
//! [here].
//!
//! [rust]: https://www.rust-lang.org
//! [book]: http://www.pbrt.org
//! [here]: integrators/fn.render.html
//! [`Primitive`]: core/primitive/trait.Primitive.html

#[macro_use]
extern crate impl_ops;

pub mod accelerators;
pub mod blockqueue;
pub mod core;
pub mod integrators;
pub mod shapes;
