//! The abstract **Primitive** base class is the bridge between the
//! geometry processing and shading subsystems.
//!
//! Everything an acceleration structure can index implements the
//! **Primitive** trait: concrete geometry (**GeometricPrimitive**),
//! instances (**TransformedPrimitive**), composite objects which are
//! refined into their parts before a build (e.g. a triangle mesh),
//! and acceleration structures themselves, which can be nested.
//!
//! Primitives which contain other primitives expose them for lookup
//! by name through the **Aggregate** trait.

// std
use std::sync::Arc;
// pbrt
use crate::core::geometry::{Bounds3f, Ray};
use crate::core::interaction::SurfaceInteraction;
use crate::core::material::Material;
use crate::core::shape::Shape;
use crate::core::transform::Transform;

// see primitive.h

pub trait Primitive {
    fn world_bound(&self) -> Bounds3f;
    /// Nearest hit along the ray. On success `ray.t_max` is shrunk
    /// to the hit distance, so subsequent tests only report closer
    /// hits.
    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction>;
    /// Any hit along the ray; the ray is left untouched.
    fn intersect_p(&self, ray: &Ray) -> bool;
    /// Composite primitives return `false` and have to be refined
    /// before they can be intersected.
    fn can_intersect(&self) -> bool {
        true
    }
    /// Appends the sub-primitives of a composite primitive.
    fn refine(&self, _refined: &mut Vec<Arc<dyn Primitive + Send + Sync>>) {}
    fn get_name(&self) -> &str;
    fn as_aggregate(&self) -> Option<&dyn Aggregate> {
        None
    }
}

/// Primitives containing other, named primitives.
pub trait Aggregate {
    /// Depth-first, pre-order search by name.
    fn find_primitive(&self, name: &str) -> Option<Arc<dyn Primitive + Send + Sync>>;
}

/// Depth-first search through a list of primitives, descending into
/// every primitive that is an aggregate itself.
pub fn find_in_primitives(
    primitives: &[Arc<dyn Primitive + Send + Sync>],
    name: &str,
) -> Option<Arc<dyn Primitive + Send + Sync>> {
    for primitive in primitives {
        if primitive.get_name() == name {
            return Some(primitive.clone());
        }
        if let Some(aggregate) = primitive.as_aggregate() {
            if let Some(found) = aggregate.find_primitive(name) {
                return Some(found);
            }
        }
    }
    None
}

/// Refines all composite primitives (recursively) until only
/// intersectable ones are left. The order of the input is kept,
/// sub-primitives take the place of their parent.
pub fn fully_refine(
    primitives: &[Arc<dyn Primitive + Send + Sync>],
) -> Vec<Arc<dyn Primitive + Send + Sync>> {
    let mut refined: Vec<Arc<dyn Primitive + Send + Sync>> = Vec::with_capacity(primitives.len());
    let mut todo: Vec<Arc<dyn Primitive + Send + Sync>> = primitives.iter().rev().cloned().collect();
    while let Some(primitive) = todo.pop() {
        if primitive.can_intersect() {
            refined.push(primitive);
        } else {
            let mut parts: Vec<Arc<dyn Primitive + Send + Sync>> = Vec::new();
            primitive.refine(&mut parts);
            todo.extend(parts.into_iter().rev());
        }
    }
    refined
}

#[derive(Clone)]
pub struct GeometricPrimitive {
    pub name: String,
    pub shape: Arc<dyn Shape + Send + Sync>,
    pub material: Option<Arc<dyn Material + Send + Sync>>,
}

impl GeometricPrimitive {
    pub fn new(
        name: &str,
        shape: Arc<dyn Shape + Send + Sync>,
        material: Option<Arc<dyn Material + Send + Sync>>,
    ) -> Self {
        GeometricPrimitive {
            name: name.to_string(),
            shape,
            material,
        }
    }
    pub fn get_material(&self) -> Option<Arc<dyn Material + Send + Sync>> {
        self.material.clone()
    }
}

impl Primitive for GeometricPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }
    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction> {
        let (mut isect, t_hit) = self.shape.intersect(ray)?;
        ray.t_max = t_hit;
        if isect.material.is_none() {
            isect.material = self.get_material();
        }
        Some(isect)
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        self.shape.intersect_p(ray)
    }
    fn get_name(&self) -> &str {
        &self.name
    }
}

/// Places a shared primitive into the world with a
/// primitive-to-world transformation.
pub struct TransformedPrimitive {
    pub name: String,
    pub primitive: Arc<dyn Primitive + Send + Sync>,
    pub primitive_to_world: Transform,
}

impl TransformedPrimitive {
    pub fn new(
        name: &str,
        primitive: Arc<dyn Primitive + Send + Sync>,
        primitive_to_world: Transform,
    ) -> Self {
        TransformedPrimitive {
            name: name.to_string(),
            primitive,
            primitive_to_world,
        }
    }
}

impl Primitive for TransformedPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.primitive_to_world
            .transform_bounds(&self.primitive.world_bound())
    }
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction> {
        // compute _ray_ after transformation by _self.primitive_to_world_
        let mut ray: Ray = Transform::inverse(&self.primitive_to_world).transform_ray(r);
        let isect = self.primitive.intersect(&mut ray)?;
        r.t_max = ray.t_max;
        // transform instance's intersection data to world space
        if self.primitive_to_world.is_identity() {
            Some(isect)
        } else {
            Some(
                self.primitive_to_world
                    .transform_surface_interaction(&isect),
            )
        }
    }
    fn intersect_p(&self, r: &Ray) -> bool {
        let ray: Ray = Transform::inverse(&self.primitive_to_world).transform_ray(r);
        self.primitive.intersect_p(&ray)
    }
    fn get_name(&self) -> &str {
        &self.name
    }
    /// Lookups through an instance return the shared primitive in its
    /// own space, the instance transform is not applied.
    fn as_aggregate(&self) -> Option<&dyn Aggregate> {
        self.primitive.as_aggregate()
    }
}
