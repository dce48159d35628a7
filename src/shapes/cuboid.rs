// std
use std::sync::Arc;
// pbrt
use crate::core::geometry::{Bounds3f, Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::material::Material;
use crate::core::pbrt::Float;
use crate::core::shape::Shape;

/// Axis-aligned box.
#[derive(Clone)]
pub struct Cuboid {
    pub bounds: Bounds3f,
    pub material: Option<Arc<dyn Material + Send + Sync>>,
}

impl Cuboid {
    pub fn new(p_min: Point3f, p_max: Point3f) -> Self {
        Cuboid {
            bounds: Bounds3f::new(p_min, p_max),
            material: None,
        }
    }
    /// Box of the given edge length around a center point.
    pub fn from_center(center: &Point3f, size: Float) -> Self {
        let h: Float = size * 0.5 as Float;
        let half: Vector3f = Vector3f { x: h, y: h, z: h };
        Cuboid::new(*center - half, *center + half)
    }
    /// Parametric distances where the ray enters and leaves the box,
    /// together with the axes of the slabs responsible.
    fn slabs(&self, r: &Ray) -> Option<(Float, u8, Float, u8)> {
        let mut t_near: Float = std::f32::NEG_INFINITY;
        let mut t_far: Float = std::f32::INFINITY;
        let mut near_axis: u8 = 0;
        let mut far_axis: u8 = 0;
        for axis in 0..3_u8 {
            let inv_ray_dir: Float = 1.0 as Float / r.d[axis];
            let mut t0: Float = (self.bounds.p_min[axis] - r.o[axis]) * inv_ray_dir;
            let mut t1: Float = (self.bounds.p_max[axis] - r.o[axis]) * inv_ray_dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // NaN (origin on a slab plane of a parallel ray) fails both tests
            if t0 > t_near {
                t_near = t0;
                near_axis = axis;
            }
            if t1 < t_far {
                t_far = t1;
                far_axis = axis;
            }
            if t_near > t_far {
                return None;
            }
        }
        Some((t_near, near_axis, t_far, far_axis))
    }
    fn hit_distance(&self, r: &Ray) -> Option<(Float, u8)> {
        let (t_near, near_axis, t_far, far_axis) = self.slabs(r)?;
        if t_near >= r.t_min && t_near <= r.t_max {
            Some((t_near, near_axis))
        } else if t_near < r.t_min && t_far >= r.t_min && t_far <= r.t_max {
            // origin inside of the box
            Some((t_far, far_axis))
        } else {
            None
        }
    }
}

impl Shape for Cuboid {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }
    fn intersect(&self, r: &Ray) -> Option<(SurfaceInteraction, Float)> {
        let (t_hit, axis) = self.hit_distance(r)?;
        let p_hit: Point3f = r.position(t_hit);
        let d: Vector3f = self.bounds.diagonal();
        let o: Vector3f = self.bounds.offset(&p_hit);
        // the two axes spanning the face which was hit
        let u_axis: u8 = (axis + 1) % 3;
        let v_axis: u8 = (axis + 2) % 3;
        let mut dpdu: Vector3f = Vector3f::default();
        let mut dpdv: Vector3f = Vector3f::default();
        let mut n: Vector3f = Vector3f::default();
        match u_axis {
            0 => dpdu.x = d.x,
            1 => dpdu.y = d.y,
            _ => dpdu.z = d.z,
        }
        match v_axis {
            0 => dpdv.x = d.x,
            1 => dpdv.y = d.y,
            _ => dpdv.z = d.z,
        }
        // outward facing normal of the face
        let center: Point3f = self.bounds.centroid();
        let sign: Float = if p_hit[axis] < center[axis] {
            -1.0 as Float
        } else {
            1.0 as Float
        };
        match axis {
            0 => n.x = sign,
            1 => n.y = sign,
            _ => n.z = sign,
        }
        let uv_hit: Point2f = Point2f {
            x: o[u_axis],
            y: o[v_axis],
        };
        let wo: Vector3f = -r.d.normalize();
        let mut si: SurfaceInteraction =
            SurfaceInteraction::new(&p_hit, &uv_hit, &wo, &dpdu, &dpdv, t_hit);
        si.set_normal(&Normal3f::from(n));
        si.material = self.material.clone();
        Some((si, t_hit))
    }
    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit_distance(r).is_some()
    }
}
