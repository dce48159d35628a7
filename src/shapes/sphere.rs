// std
use std::f32::consts::PI;
use std::sync::Arc;
// pbrt
use crate::core::geometry::vec3_dot_vec3f;
use crate::core::geometry::{Bounds3f, Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::material::Material;
use crate::core::pbrt::Float;
use crate::core::pbrt::{clamp_t, quadratic};
use crate::core::shape::Shape;

// see sphere.h

/// Full sphere, placed in world space by its center.
#[derive(Clone)]
pub struct Sphere {
    pub center: Point3f,
    pub radius: Float,
    pub material: Option<Arc<dyn Material + Send + Sync>>,
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere {
            center: Point3f::default(),
            radius: 1.0,
            material: None,
        }
    }
}

impl Sphere {
    pub fn new(center: Point3f, radius: Float) -> Self {
        Sphere {
            center,
            radius,
            material: None,
        }
    }
    /// Closest root of the ray/sphere equation within
    /// `[r.t_min, r.t_max]`.
    fn hit_distance(&self, r: &Ray) -> Option<Float> {
        // compute quadratic sphere coefficients
        let oc: Vector3f = r.o - self.center;
        let a: Float = r.d.length_squared();
        let b: Float = 2.0 as Float * vec3_dot_vec3f(&r.d, &oc);
        let c: Float = oc.length_squared() - self.radius * self.radius;
        // solve quadratic equation for _t_ values
        let mut t0: Float = 0.0;
        let mut t1: Float = 0.0;
        if !quadratic(a, b, c, &mut t0, &mut t1) {
            return None;
        }
        // check quadric shape _t0_ and _t1_ for nearest intersection
        if t0 > r.t_max || t1 < r.t_min {
            return None;
        }
        let mut t_shape_hit: Float = t0;
        if t_shape_hit < r.t_min {
            t_shape_hit = t1;
            if t_shape_hit > r.t_max {
                return None;
            }
        }
        Some(t_shape_hit)
    }
}

impl Shape for Sphere {
    fn world_bound(&self) -> Bounds3f {
        let r: Vector3f = Vector3f {
            x: self.radius,
            y: self.radius,
            z: self.radius,
        };
        Bounds3f::new(self.center - r, self.center + r)
    }
    fn intersect(&self, r: &Ray) -> Option<(SurfaceInteraction, Float)> {
        let t_shape_hit: Float = self.hit_distance(r)?;
        // compute sphere hit position (relative to the center) and $\phi$
        let mut p_hit: Vector3f = r.position(t_shape_hit) - self.center;
        // refine sphere intersection point
        p_hit = p_hit * (self.radius / p_hit.length());
        if p_hit.x == 0.0 && p_hit.y == 0.0 {
            p_hit.x = 1e-5_f32 * self.radius;
        }
        let mut phi: Float = p_hit.y.atan2(p_hit.x);
        if phi < 0.0 {
            phi += 2.0_f32 * PI;
        }
        // find parametric representation of sphere hit
        let phi_max: Float = 2.0_f32 * PI;
        let u: Float = phi / phi_max;
        let theta: Float = clamp_t(p_hit.z / self.radius, -1.0, 1.0).acos();
        let v: Float = 1.0 as Float - theta / PI;
        // compute sphere $\dpdu$ and $\dpdv$
        let z_radius: Float = (p_hit.x * p_hit.x + p_hit.y * p_hit.y).sqrt();
        let inv_z_radius: Float = 1.0 / z_radius;
        let cos_phi: Float = p_hit.x * inv_z_radius;
        let sin_phi: Float = p_hit.y * inv_z_radius;
        let dpdu: Vector3f = Vector3f {
            x: -phi_max * p_hit.y,
            y: phi_max * p_hit.x,
            z: 0.0,
        };
        let dpdv: Vector3f = Vector3f {
            x: p_hit.z * cos_phi,
            y: p_hit.z * sin_phi,
            z: -self.radius * theta.sin(),
        } * -PI;
        // initialize _SurfaceInteraction_ from parametric information
        let uv_hit: Point2f = Point2f { x: u, y: v };
        let wo: Vector3f = -r.d.normalize();
        let mut si: SurfaceInteraction = SurfaceInteraction::new(
            &(self.center + p_hit),
            &uv_hit,
            &wo,
            &dpdu,
            &dpdv,
            t_shape_hit,
        );
        si.set_normal(&Normal3f::from(p_hit / self.radius));
        si.material = self.material.clone();
        Some((si, t_shape_hit))
    }
    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit_distance(r).is_some()
    }
}
