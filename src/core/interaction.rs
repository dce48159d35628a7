//! The geometry of a particular point on a surface is represented by
//! a **SurfaceInteraction**. Having this abstraction lets most of the
//! system work with points on surfaces without needing to consider
//! the particular type of geometric shape the points lie on; the
//! **SurfaceInteraction** abstraction supplies enough information
//! about the surface point to allow the shading and geometric
//! operations to be implemented generically.
//!
//! Besides the hit point and its differential geometry it carries
//! the parametric distance of the hit (**t_hit**), an epsilon to
//! offset secondary rays with (**ray_epsilon**), and the material of
//! the primitive that was hit.

// std
use std::sync::Arc;
// pbrt
use crate::core::geometry::{nrm_faceforward_vec3, vec3_cross_vec3};
use crate::core::geometry::{Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::material::Material;
use crate::core::pbrt::Float;

/// Secondary rays start this fraction of the hit distance away from
/// the surface.
pub const RAY_EPSILON_SCALE: Float = 1e-3;

// see interaction.h

#[derive(Debug, Default, Copy, Clone)]
pub struct Shading {
    pub n: Normal3f,
    pub dpdu: Vector3f,
    pub dpdv: Vector3f,
}

#[derive(Default, Clone)]
pub struct SurfaceInteraction {
    pub p: Point3f,
    pub wo: Vector3f,
    pub n: Normal3f,
    pub uv: Point2f,
    pub dpdu: Vector3f,
    pub dpdv: Vector3f,
    pub shading: Shading,
    pub t_hit: Float,
    pub ray_epsilon: Float,
    pub material: Option<Arc<dyn Material + Send + Sync>>,
}

impl SurfaceInteraction {
    pub fn new(
        p: &Point3f,
        uv: &Point2f,
        wo: &Vector3f,
        dpdu: &Vector3f,
        dpdv: &Vector3f,
        t_hit: Float,
    ) -> Self {
        let nv: Vector3f = vec3_cross_vec3(dpdu, dpdv);
        // flat boxes have no extent along one of the tangents
        let n: Normal3f = if nv.length_squared() > 0.0 as Float {
            Normal3f::from(nv.normalize())
        } else {
            Normal3f::default()
        };
        // initialize shading geometry from true geometry
        let shading: Shading = Shading {
            n,
            dpdu: *dpdu,
            dpdv: *dpdv,
        };
        SurfaceInteraction {
            p: *p,
            wo: *wo,
            n,
            uv: *uv,
            dpdu: *dpdu,
            dpdv: *dpdv,
            shading,
            t_hit,
            ray_epsilon: RAY_EPSILON_SCALE * t_hit,
            material: None,
        }
    }
    /// Replaces the geometric normal, e.g. for shapes whose
    /// parametrization doesn't yield the outward facing normal.
    pub fn set_normal(&mut self, n: &Normal3f) {
        self.n = *n;
        self.shading.n = *n;
    }
    pub fn set_shading_geometry(&mut self, n: &Normal3f, dpdus: &Vector3f, dpdvs: &Vector3f) {
        // shading normal stays in the hemisphere of the true normal
        self.shading.n = nrm_faceforward_vec3(n, &Vector3f::from(self.n));
        self.shading.dpdu = *dpdus;
        self.shading.dpdv = *dpdvs;
    }
    /// A ray leaving the surface in direction *d*.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray {
            o: self.p,
            d: *d,
            t_min: self.ray_epsilon,
            t_max: std::f32::INFINITY,
        }
    }
    /// A segment from the surface to *p2*, shortened on both ends by
    /// the ray epsilon. Used for shadow rays.
    pub fn spawn_ray_to(&self, p2: &Point3f) -> Ray {
        Ray {
            o: self.p,
            d: *p2 - self.p,
            t_min: self.ray_epsilon,
            t_max: 1.0 as Float - self.ray_epsilon,
        }
    }
}
