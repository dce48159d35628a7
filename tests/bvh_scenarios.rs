// std
use std::sync::{Arc, RwLock};
// pbrt
use rs_bvh::accelerators::bvh::{BVHAccel, SplitMethod, DEFAULT_MAX_PRIMS_IN_NODE};
use rs_bvh::core::geometry::{Point2f, Point3f, Ray, Vector3f};
use rs_bvh::core::paramset::ParamSet;
use rs_bvh::core::pbrt::Float;
use rs_bvh::core::primitive::{Aggregate, GeometricPrimitive, Primitive, TransformedPrimitive};
use rs_bvh::core::rng::Rng;
use rs_bvh::core::transform::Transform;
use rs_bvh::shapes::cuboid::Cuboid;
use rs_bvh::shapes::sphere::Sphere;
use rs_bvh::shapes::triangle::{TriangleMesh, TriangleMeshPrimitive};

const ALL_METHODS: [SplitMethod; 3] = [
    SplitMethod::SAH,
    SplitMethod::Middle,
    SplitMethod::EqualCounts,
];

fn unit_box(name: &str, center: Point3f) -> Arc<dyn Primitive + Send + Sync> {
    Arc::new(GeometricPrimitive::new(
        name,
        Arc::new(Cuboid::from_center(&center, 1.0)),
        None,
    ))
}

fn sphere(name: &str, center: Point3f, radius: Float) -> Arc<dyn Primitive + Send + Sync> {
    Arc::new(GeometricPrimitive::new(
        name,
        Arc::new(Sphere::new(center, radius)),
        None,
    ))
}

fn boxes_along_x(n: usize, spacing: Float) -> Vec<Arc<dyn Primitive + Send + Sync>> {
    (0..n)
        .map(|i| {
            unit_box(
                &format!("box{}", i),
                Point3f {
                    x: i as Float * spacing,
                    y: 0.0,
                    z: 0.0,
                },
            )
        })
        .collect()
}

fn random_point(rng: &mut Rng, extent: Float) -> Point3f {
    Point3f {
        x: rng.uniform_float_in(-extent, extent),
        y: rng.uniform_float_in(-extent, extent),
        z: rng.uniform_float_in(-extent, extent),
    }
}

fn random_spheres(n: usize, seed: u64) -> Vec<Arc<dyn Primitive + Send + Sync>> {
    let mut rng = Rng::with_sequence(seed);
    (0..n)
        .map(|i| {
            let center = random_point(&mut rng, 20.0);
            let radius = rng.uniform_float_in(0.2, 1.5);
            sphere(&format!("sphere{}", i), center, radius)
        })
        .collect()
}

fn random_rays(n: usize, seed: u64) -> Vec<Ray> {
    let mut rng = Rng::with_sequence(seed);
    (0..n)
        .map(|_| {
            let o = random_point(&mut rng, 30.0);
            let target = random_point(&mut rng, 20.0);
            Ray::new(o, (target - o).normalize())
        })
        .collect()
}

fn brute_force(prims: &[Arc<dyn Primitive + Send + Sync>], ray: &Ray) -> Option<Float> {
    let mut r = *ray;
    let mut t_hit: Option<Float> = None;
    for p in prims {
        if let Some(isect) = p.intersect(&mut r) {
            t_hit = Some(isect.t_hit);
        }
    }
    t_hit
}

fn nearest(bvh: &BVHAccel, ray: &Ray) -> Option<Float> {
    let mut r = *ray;
    bvh.intersect(&mut r).map(|isect| isect.t_hit)
}

fn along_x(o: Point3f) -> Ray {
    Ray::new(
        o,
        Vector3f {
            x: 1.0,
            y: 0.0,
            z: 0.0,
        },
    )
}

#[test]
fn twenty_boxes_first_hit() {
    for method in ALL_METHODS.iter() {
        let bvh = BVHAccel::new(boxes_along_x(20, 1.0), DEFAULT_MAX_PRIMS_IN_NODE, *method);
        assert_eq!(bvh.len(), 20);
        let mut ray = along_x(Point3f {
            x: -5.0,
            y: 0.0,
            z: 0.0,
        });
        assert!(bvh.intersect_p(&ray));
        let isect = bvh.intersect(&mut ray).unwrap();
        assert!((isect.t_hit - 4.5).abs() < 1e-4);
        assert!((isect.p.x + 0.5).abs() < 1e-4);
        assert!((isect.n.x + 1.0).abs() < 1e-4);
        assert!((ray.t_max - 4.5).abs() < 1e-4);
    }
}

#[test]
fn separated_boxes_exact_distances() {
    for method in ALL_METHODS.iter() {
        let bvh = BVHAccel::new(boxes_along_x(32, 2.0), 2, *method);
        for i in 0..32 {
            let x: Float = i as Float * 2.0;
            let mut down = Ray::new(
                Point3f { x, y: 5.0, z: 0.0 },
                Vector3f {
                    x: 0.0,
                    y: -1.0,
                    z: 0.0,
                },
            );
            let isect = bvh.intersect(&mut down).unwrap();
            assert!((isect.t_hit - 4.5).abs() < 1e-4);
            assert!((isect.p.x - x).abs() < 1e-4);
            // passes through the gap right after the box
            let gap = Ray::new(
                Point3f {
                    x: x + 1.0,
                    y: 5.0,
                    z: 0.0,
                },
                Vector3f {
                    x: 0.0,
                    y: -1.0,
                    z: 0.0,
                },
            );
            assert!(!bvh.intersect_p(&gap));
        }
        // parallel to the row, but above it
        let mut above = along_x(Point3f {
            x: -5.0,
            y: 2.0,
            z: 0.0,
        });
        assert!(!bvh.intersect_p(&above));
        assert!(bvh.intersect(&mut above).is_none());
        assert!(above.t_max.is_infinite());
    }
}

#[test]
fn bvh_matches_brute_force() {
    let prims = random_spheres(400, 7);
    let rays = random_rays(600, 8);
    for method in ALL_METHODS.iter() {
        for max_prims in [1_usize, 4, 10].iter() {
            let bvh = BVHAccel::new(prims.clone(), *max_prims, *method);
            let mut hits: usize = 0;
            for ray in &rays {
                let expected = brute_force(&prims, ray);
                let found = nearest(&bvh, ray);
                match (expected, found) {
                    (Some(e), Some(f)) => {
                        assert!((e - f).abs() <= 1e-3 * e.max(1.0));
                        hits += 1;
                    }
                    (None, None) => {}
                    _ => panic!("{} mismatch: {:?} vs {:?}", method, expected, found),
                }
                assert_eq!(bvh.intersect_p(ray), expected.is_some());
            }
            assert!(hits > 0);
        }
    }
}

#[test]
fn shortened_rays_stop_early() {
    let bvh = BVHAccel::new(boxes_along_x(20, 1.0), 4, SplitMethod::SAH);
    let mut ray = along_x(Point3f {
        x: -5.0,
        y: 0.0,
        z: 0.0,
    });
    ray.t_max = 4.0;
    assert!(!bvh.intersect_p(&ray));
    assert!(bvh.intersect(&mut ray).is_none());
    // starting inside the row the exit of the first box is reported
    let mut inside = along_x(Point3f {
        x: 3.0,
        y: 0.0,
        z: 0.0,
    });
    let isect = bvh.intersect(&mut inside).unwrap();
    assert!((isect.t_hit - 0.5).abs() < 1e-4);
}

#[test]
fn concurrent_queries_agree() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BVHAccel>();
    let bvh = BVHAccel::new(random_spheres(1000, 21), 4, SplitMethod::SAH);
    let rays = random_rays(500, 22);
    let expected: Vec<Option<Float>> = rays.iter().map(|r| nearest(&bvh, r)).collect();
    let occluded: Vec<bool> = rays.iter().map(|r| bvh.intersect_p(r)).collect();
    let bvh = &bvh;
    let rays = &rays;
    let expected = &expected;
    let occluded = &occluded;
    crossbeam::scope(|scope| {
        for t in 0..4 {
            scope.spawn(move |_| {
                // every thread walks the rays in a different order
                for k in 0..rays.len() {
                    let i = (k * 7 + t * 131) % rays.len();
                    assert_eq!(nearest(bvh, &rays[i]), expected[i]);
                    assert_eq!(bvh.intersect_p(&rays[i]), occluded[i]);
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn rebuild_behind_lock() {
    let scene = RwLock::new(BVHAccel::new(boxes_along_x(10, 2.0), 2, SplitMethod::SAH));
    let ray = along_x(Point3f {
        x: -5.0,
        y: 0.0,
        z: 0.0,
    });
    crossbeam::scope(|scope| {
        for _ in 0..3 {
            scope.spawn(|_| {
                let bvh = scene.read().unwrap();
                let t = nearest(&bvh, &ray).unwrap();
                assert!((t - 4.5).abs() < 1e-4);
            });
        }
    })
    .unwrap();
    {
        let mut bvh = scene.write().unwrap();
        assert_eq!(bvh.remove_primitive("box0"), 1);
        bvh.rebuild();
    }
    let bvh = scene.read().unwrap();
    let t = nearest(&bvh, &ray).unwrap();
    assert!((t - 6.5).abs() < 1e-4);
}

#[test]
fn removed_primitives_are_gone() {
    for method in ALL_METHODS.iter() {
        let mut bvh = BVHAccel::new(boxes_along_x(20, 1.0), 3, *method);
        let bound_before = bvh.world_bound();
        assert_eq!(bvh.remove_primitive("box0"), 1);
        assert!(!bvh.is_built());
        assert!(bvh.world_bound().is_empty());
        bvh.rebuild();
        assert_eq!(bvh.len(), 19);
        assert!(bvh.find_primitive("box0").is_none());
        assert!(bvh.find_primitive("box1").is_some());
        assert!((bvh.world_bound().p_min.x - 0.5).abs() < 1e-5);
        assert_eq!(bvh.world_bound().p_max, bound_before.p_max);
        let t = nearest(
            &bvh,
            &along_x(Point3f {
                x: -5.0,
                y: 0.0,
                z: 0.0,
            }),
        )
        .unwrap();
        assert!((t - 5.5).abs() < 1e-4);
    }
}

#[test]
fn meshes_are_refined_and_searchable() {
    let plane = Arc::new(TriangleMesh::ground_plane(
        &Point2f { x: -4.0, y: -4.0 },
        &Point2f { x: 4.0, y: 4.0 },
        0.0,
        4,
    ));
    let mut bvh = BVHAccel::with_settings(4, SplitMethod::SAH);
    bvh.add_primitive(Arc::new(TriangleMeshPrimitive::new("ground", plane, None)));
    bvh.add_primitive(sphere(
        "ball",
        Point3f {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        },
        1.0,
    ));
    // the unrefined mesh can be searched before the build
    let before = bvh.find_primitive("ground/3").unwrap();
    assert_eq!(before.get_name(), "ground/3");
    assert!(bvh.find_primitive("ground").is_some());
    bvh.preprocess();
    assert_eq!(bvh.len(), 32 + 1);
    assert!(bvh.find_primitive("ground").is_none());
    let after = bvh.find_primitive("ground/3").unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    let down = |x: Float| {
        Ray::new(
            Point3f { x, y: 5.0, z: 0.5 },
            Vector3f {
                x: 0.0,
                y: -1.0,
                z: 0.0,
            },
        )
    };
    let mut ray = down(2.5);
    let isect = bvh.intersect(&mut ray).unwrap();
    assert!((isect.t_hit - 5.0).abs() < 1e-4);
    assert!((isect.n.y - 1.0).abs() < 1e-4);
    // the ball is above the ground
    let mut ray = down(0.0);
    let isect = bvh.intersect(&mut ray).unwrap();
    assert!(isect.t_hit < 3.5);
}

#[test]
fn nested_hierarchies() {
    let mut inner = BVHAccel::with_settings(1, SplitMethod::Middle).with_name("inner");
    inner.add_primitive(sphere(
        "dup",
        Point3f {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        0.5,
    ));
    inner.add_primitive(sphere(
        "b",
        Point3f {
            x: 2.0,
            y: 0.0,
            z: 0.0,
        },
        0.5,
    ));
    inner.preprocess();
    let inner: Arc<dyn Primitive + Send + Sync> = Arc::new(inner);
    let instance: Arc<dyn Primitive + Send + Sync> = Arc::new(TransformedPrimitive::new(
        "instance",
        inner.clone(),
        Transform::translate(&Vector3f {
            x: 0.0,
            y: 10.0,
            z: 0.0,
        }),
    ));
    let outer_dup = sphere(
        "dup",
        Point3f {
            x: 0.0,
            y: -10.0,
            z: 0.0,
        },
        0.5,
    );
    let mut outer = BVHAccel::with_settings(1, SplitMethod::SAH).with_name("outer");
    outer.add_primitive(inner.clone());
    outer.add_primitive(outer_dup.clone());
    outer.add_primitive(instance);
    // pre-order: the nested "dup" comes first
    let found = outer.find_primitive("dup").unwrap();
    assert!(!Arc::ptr_eq(&found, &outer_dup));
    assert!(Arc::ptr_eq(
        &found,
        &inner.as_aggregate().unwrap().find_primitive("dup").unwrap()
    ));
    assert!(Arc::ptr_eq(&outer.find_primitive("inner").unwrap(), &inner));
    assert!(outer.find_primitive("missing").is_none());
    outer.preprocess();
    assert_eq!(outer.len(), 3);
    assert!(outer.find_primitive("b").is_some());
    // the original, the instance and the second "dup"
    for (y, expected) in [(0.0 as Float, 4.5 as Float), (10.0, 4.5), (-10.0, 4.5)].iter() {
        let mut ray = along_x(Point3f {
            x: -5.0,
            y: *y,
            z: 0.0,
        });
        let isect = outer.intersect(&mut ray).unwrap();
        assert!((isect.t_hit - expected).abs() < 1e-4);
        assert!((isect.p.y - y).abs() < 1e-4);
    }
    let b = outer.world_bound();
    assert!((b.p_max.y - 10.5).abs() < 1e-4);
    assert!((b.p_min.y + 10.5).abs() < 1e-4);
}

#[test]
fn factory_builds_with_every_method() {
    for name in ["sah", "middle", "equal"].iter() {
        let mut ps = ParamSet::default();
        ps.add_string("splitmethod", name);
        ps.add_int("maxnodeprims", 2);
        let bvh = BVHAccel::try_create(boxes_along_x(20, 1.0), &ps).unwrap();
        assert_eq!(bvh.split_method().to_string(), *name);
        assert!(bvh.total_nodes() > 1);
        assert!(ps.unused().is_empty());
    }
}
