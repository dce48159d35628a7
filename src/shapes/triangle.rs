// std
use std::sync::Arc;
// pbrt
use crate::core::geometry::{bnd3_union_pnt3f, vec3_cross_vec3, vec3_dot_vec3f};
use crate::core::geometry::{Bounds3f, Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::material::Material;
use crate::core::pbrt::Float;
use crate::core::primitive::{Aggregate, GeometricPrimitive, Primitive};
use crate::core::shape::Shape;

// see triangle.h

/// Hits on surfaces with a lower alpha value are ignored.
pub const ALPHA_CUTOFF: Float = 0.1;

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// the total number of triangles in the mesh
    pub n_triangles: usize,
    /// vector of vertex indices
    pub vertex_indices: Vec<usize>,
    /// the total number of vertices in the mesh
    pub n_vertices: usize,
    /// vector of *n_vertices* vertex positions
    pub p: Vec<Point3f>,
    /// an optional vector of normal vectors (can be empty)
    pub n: Vec<Normal3f>,
    /// an optional vector of tangent vectors along u (can be empty)
    pub s: Vec<Vector3f>,
    /// an optional vector of tangent vectors along v (can be empty)
    pub t: Vec<Vector3f>,
    /// an optional vector of paramtric (u, v) values (texture coordinates)
    pub uv: Vec<Point2f>,
}

impl TriangleMesh {
    pub fn new(
        vertex_indices: Vec<usize>,
        p: Vec<Point3f>,
        n: Vec<Normal3f>,
        s: Vec<Vector3f>,
        t: Vec<Vector3f>,
        uv: Vec<Point2f>,
    ) -> Self {
        assert_eq!(vertex_indices.len() % 3, 0);
        TriangleMesh {
            n_triangles: vertex_indices.len() / 3,
            n_vertices: p.len(),
            vertex_indices,
            p,
            n,
            s,
            t,
            uv,
        }
    }
    /// A rectangle in the xz-plane at height *y*, split into
    /// `2 * divisions * divisions` triangles facing +y.
    pub fn ground_plane(p_min: &Point2f, p_max: &Point2f, y: Float, divisions: usize) -> Self {
        let divisions: usize = divisions.max(1);
        let mut p: Vec<Point3f> = Vec::with_capacity((divisions + 1) * (divisions + 1));
        let mut n: Vec<Normal3f> = Vec::with_capacity(p.capacity());
        let mut uv: Vec<Point2f> = Vec::with_capacity(p.capacity());
        for j in 0..=divisions {
            for i in 0..=divisions {
                let u: Float = i as Float / divisions as Float;
                let v: Float = j as Float / divisions as Float;
                p.push(Point3f {
                    x: p_min.x + (p_max.x - p_min.x) * u,
                    y,
                    z: p_min.y + (p_max.y - p_min.y) * v,
                });
                n.push(Normal3f {
                    x: 0.0,
                    y: 1.0,
                    z: 0.0,
                });
                uv.push(Point2f { x: u, y: v });
            }
        }
        let row: usize = divisions + 1;
        let mut vertex_indices: Vec<usize> = Vec::with_capacity(divisions * divisions * 6);
        for j in 0..divisions {
            for i in 0..divisions {
                let v0: usize = j * row + i;
                let v1: usize = v0 + 1;
                let v2: usize = v0 + row;
                let v3: usize = v2 + 1;
                // counter-clockwise seen from above
                vertex_indices.extend_from_slice(&[v0, v2, v1, v1, v2, v3]);
            }
        }
        TriangleMesh::new(vertex_indices, p, n, Vec::new(), Vec::new(), uv)
    }
    pub fn world_bound(&self) -> Bounds3f {
        self.p
            .iter()
            .fold(Bounds3f::default(), |b, p| bnd3_union_pnt3f(&b, p))
    }
}

#[derive(Clone)]
pub struct Triangle {
    mesh: Arc<TriangleMesh>,
    pub id: usize,
    pub material: Option<Arc<dyn Material + Send + Sync>>,
}

impl Triangle {
    pub fn new(
        mesh: Arc<TriangleMesh>,
        tri_number: usize,
        material: Option<Arc<dyn Material + Send + Sync>>,
    ) -> Self {
        assert!(tri_number < mesh.n_triangles);
        Triangle {
            mesh,
            id: tri_number,
            material,
        }
    }
    fn vertex(&self, i: usize) -> usize {
        self.mesh.vertex_indices[self.id * 3 + i]
    }
    pub fn get_uvs(&self) -> [Point2f; 3] {
        if self.mesh.uv.is_empty() {
            [
                Point2f { x: 0.0, y: 0.0 },
                Point2f { x: 1.0, y: 0.0 },
                Point2f { x: 1.0, y: 1.0 },
            ]
        } else {
            [
                self.mesh.uv[self.vertex(0)],
                self.mesh.uv[self.vertex(1)],
                self.mesh.uv[self.vertex(2)],
            ]
        }
    }
    fn alpha(&self, uv: &Point2f) -> Float {
        match self.material {
            Some(ref material) => material.alpha(uv),
            None => 1.0 as Float,
        }
    }
    /// Barycentric coordinates of the second and third vertex and the
    /// parametric distance. Hits exactly on an edge are rejected.
    fn barycentric_hit(&self, ray: &Ray) -> Option<(Float, Float, Float)> {
        let a: Point3f = self.mesh.p[self.vertex(0)];
        let b: Point3f = self.mesh.p[self.vertex(1)];
        let c: Point3f = self.mesh.p[self.vertex(2)];
        let oa: Vector3f = ray.o - a;
        let ca: Vector3f = c - a;
        let ba: Vector3f = b - a;
        let normal: Vector3f = vec3_cross_vec3(&ba, &ca);
        let neg_d: Vector3f = -ray.d;
        let det: Float = vec3_dot_vec3f(&neg_d, &normal);
        if det == 0.0 as Float {
            return None;
        }
        let alpha: Float = vec3_dot_vec3f(&neg_d, &vec3_cross_vec3(&oa, &ca)) / det;
        if alpha <= 0.0 || alpha >= 1.0 {
            return None;
        }
        let beta: Float = vec3_dot_vec3f(&neg_d, &vec3_cross_vec3(&ba, &oa)) / det;
        if beta <= 0.0 || beta >= 1.0 || alpha + beta >= 1.0 {
            return None;
        }
        let t: Float = vec3_dot_vec3f(&oa, &normal) / det;
        if t < ray.t_min || t > ray.t_max {
            return None;
        }
        Some((alpha, beta, t))
    }
}

fn interpolate_uv(b0: Float, b1: Float, b2: Float, uv: &[Point2f; 3]) -> Point2f {
    uv[0] * b0 + uv[1] * b1 + uv[2] * b2
}

impl Shape for Triangle {
    fn world_bound(&self) -> Bounds3f {
        let p0: Point3f = self.mesh.p[self.vertex(0)];
        let p1: Point3f = self.mesh.p[self.vertex(1)];
        let p2: Point3f = self.mesh.p[self.vertex(2)];
        bnd3_union_pnt3f(&Bounds3f::new(p0, p1), &p2)
    }
    fn intersect(&self, ray: &Ray) -> Option<(SurfaceInteraction, Float)> {
        let (b1, b2, t) = self.barycentric_hit(ray)?;
        let b0: Float = 1.0 as Float - b1 - b2;
        // compute uv coords
        let uv_hit: Point2f = interpolate_uv(b0, b1, b2, &self.get_uvs());
        // reject if cut out by alpha
        if self.alpha(&uv_hit) < ALPHA_CUTOFF {
            return None;
        }
        let i0: usize = self.vertex(0);
        let i1: usize = self.vertex(1);
        let i2: usize = self.vertex(2);
        let p0: Point3f = self.mesh.p[i0];
        let ba: Vector3f = self.mesh.p[i1] - p0;
        let ca: Vector3f = self.mesh.p[i2] - p0;
        let p_hit: Point3f = ray.position(t);
        let wo: Vector3f = -ray.d.normalize();
        let mut si: SurfaceInteraction = SurfaceInteraction::new(&p_hit, &uv_hit, &wo, &ba, &ca, t);
        si.set_normal(&Normal3f::from(vec3_cross_vec3(&ba, &ca).normalize()));
        // interpolate shading normal and tangents
        let ns: Normal3f = if self.mesh.n.is_empty() {
            si.n
        } else {
            let n: Normal3f =
                self.mesh.n[i0] * b0 + self.mesh.n[i1] * b1 + self.mesh.n[i2] * b2;
            if n.length_squared() > 0.0 as Float {
                n.normalize()
            } else {
                si.n
            }
        };
        let ss: Vector3f = if self.mesh.s.is_empty() {
            ba
        } else {
            self.mesh.s[i0] * b0 + self.mesh.s[i1] * b1 + self.mesh.s[i2] * b2
        };
        let ts: Vector3f = if self.mesh.t.is_empty() {
            ca
        } else {
            self.mesh.t[i0] * b0 + self.mesh.t[i1] * b1 + self.mesh.t[i2] * b2
        };
        si.set_shading_geometry(&ns, &ss, &ts);
        si.material = self.material.clone();
        Some((si, t))
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        if let Some((b1, b2, _t)) = self.barycentric_hit(ray) {
            let b0: Float = 1.0 as Float - b1 - b2;
            let uv_hit: Point2f = interpolate_uv(b0, b1, b2, &self.get_uvs());
            // only fully transparent surfaces let shadow rays pass
            self.alpha(&uv_hit) != 0.0 as Float
        } else {
            false
        }
    }
}

/// A named triangle mesh. It has to be refined into one primitive per
/// triangle (named `"<mesh>/<index>"`) before an acceleration
/// structure can be built over it.
pub struct TriangleMeshPrimitive {
    pub name: String,
    pub mesh: Arc<TriangleMesh>,
    pub material: Option<Arc<dyn Material + Send + Sync>>,
    triangles: Vec<Arc<dyn Primitive + Send + Sync>>,
}

impl TriangleMeshPrimitive {
    pub fn new(
        name: &str,
        mesh: Arc<TriangleMesh>,
        material: Option<Arc<dyn Material + Send + Sync>>,
    ) -> Self {
        let mut triangles: Vec<Arc<dyn Primitive + Send + Sync>> =
            Vec::with_capacity(mesh.n_triangles);
        for i in 0..mesh.n_triangles {
            let triangle = Arc::new(Triangle::new(mesh.clone(), i, material.clone()));
            triangles.push(Arc::new(GeometricPrimitive::new(
                &format!("{}/{}", name, i),
                triangle,
                material.clone(),
            )));
        }
        TriangleMeshPrimitive {
            name: name.to_string(),
            mesh,
            material,
            triangles,
        }
    }
}

impl Primitive for TriangleMeshPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.mesh.world_bound()
    }
    /// Brute force over all triangles, a mesh is meant to be refined.
    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction> {
        let mut isect: Option<SurfaceInteraction> = None;
        for triangle in &self.triangles {
            if let Some(hit) = triangle.intersect(ray) {
                isect = Some(hit);
            }
        }
        isect
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        self.triangles.iter().any(|triangle| triangle.intersect_p(ray))
    }
    fn can_intersect(&self) -> bool {
        false
    }
    fn refine(&self, refined: &mut Vec<Arc<dyn Primitive + Send + Sync>>) {
        refined.extend(self.triangles.iter().cloned());
    }
    fn get_name(&self) -> &str {
        &self.name
    }
    fn as_aggregate(&self) -> Option<&dyn Aggregate> {
        Some(self)
    }
}

impl Aggregate for TriangleMeshPrimitive {
    fn find_primitive(&self, name: &str) -> Option<Arc<dyn Primitive + Send + Sync>> {
        self.triangles
            .iter()
            .find(|triangle| triangle.get_name() == name)
            .cloned()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::material::MatteMaterial;
    use crate::core::primitive::fully_refine;

    fn single_triangle() -> Arc<TriangleMesh> {
        Arc::new(TriangleMesh::new(
            vec![0, 1, 2],
            vec![
                Point3f {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
                Point3f {
                    x: 1.0,
                    y: 0.0,
                    z: 0.0,
                },
                Point3f {
                    x: 0.0,
                    y: 1.0,
                    z: 0.0,
                },
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ))
    }

    fn ray_down_z(x: Float, y: Float) -> Ray {
        Ray::new(
            Point3f { x, y, z: 2.0 },
            Vector3f {
                x: 0.0,
                y: 0.0,
                z: -1.0,
            },
        )
    }

    #[test]
    fn barycentric_hit_and_edges() {
        let triangle = Triangle::new(single_triangle(), 0, None);
        let (si, t) = triangle.intersect(&ray_down_z(0.25, 0.25)).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
        assert!((si.n.z - 1.0).abs() < 1e-5);
        assert!((si.ray_epsilon - 2e-3).abs() < 1e-6);
        // default uvs: (0,0), (1,0), (1,1)
        assert!((si.uv.x - 0.5).abs() < 1e-5);
        assert!((si.uv.y - 0.25).abs() < 1e-5);
        // outside and exactly on an edge
        assert!(triangle.intersect(&ray_down_z(0.75, 0.75)).is_none());
        assert!(!triangle.intersect_p(&ray_down_z(0.5, 0.0)));
        assert!(triangle.intersect_p(&ray_down_z(0.1, 0.1)));
    }

    #[test]
    fn alpha_cut_out() {
        let see_through: Arc<dyn Material + Send + Sync> =
            Arc::new(MatteMaterial::with_alpha([1.0; 3], 0.05));
        let triangle = Triangle::new(single_triangle(), 0, Some(see_through));
        // ignored for shading, but still casting shadows
        assert!(triangle.intersect(&ray_down_z(0.25, 0.25)).is_none());
        assert!(triangle.intersect_p(&ray_down_z(0.25, 0.25)));
        let invisible: Arc<dyn Material + Send + Sync> =
            Arc::new(MatteMaterial::with_alpha([1.0; 3], 0.0));
        let triangle = Triangle::new(single_triangle(), 0, Some(invisible));
        assert!(!triangle.intersect_p(&ray_down_z(0.25, 0.25)));
    }

    #[test]
    fn mesh_refines_into_named_triangles() {
        let plane = Arc::new(TriangleMesh::ground_plane(
            &Point2f { x: -1.0, y: -1.0 },
            &Point2f { x: 1.0, y: 1.0 },
            0.0,
            2,
        ));
        assert_eq!(plane.n_triangles, 8);
        let prim: Arc<dyn Primitive + Send + Sync> =
            Arc::new(TriangleMeshPrimitive::new("ground", plane, None));
        assert!(!prim.can_intersect());
        let refined = fully_refine(&[prim.clone()]);
        assert_eq!(refined.len(), 8);
        assert_eq!(refined[3].get_name(), "ground/3");
        let aggregate = prim.as_aggregate().unwrap();
        let found = aggregate.find_primitive("ground/5").unwrap();
        assert!(Arc::ptr_eq(&found, &refined[5]));
        assert!(aggregate.find_primitive("ground/8").is_none());
        // the unrefined mesh still answers queries, facing up
        let mut ray = Ray::new(
            Point3f {
                x: 0.3,
                y: 1.0,
                z: 0.2,
            },
            Vector3f {
                x: 0.0,
                y: -1.0,
                z: 0.0,
            },
        );
        let isect = prim.intersect(&mut ray).unwrap();
        assert!((ray.t_max - 1.0).abs() < 1e-5);
        assert!((isect.n.y - 1.0).abs() < 1e-5);
    }
}
