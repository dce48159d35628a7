// std
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
// others
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
// pbrt
use rs_bvh::accelerators::bvh::BVHAccel;
use rs_bvh::core::camera::PinholeCamera;
use rs_bvh::core::geometry::{Point2f, Point3f, Ray, Vector3f};
use rs_bvh::core::material::{Material, MatteMaterial};
use rs_bvh::core::paramset::ParamSet;
use rs_bvh::core::pbrt::Float;
use rs_bvh::core::primitive::{GeometricPrimitive, Primitive, TransformedPrimitive};
use rs_bvh::core::rng::Rng;
use rs_bvh::core::transform::Transform;
use rs_bvh::integrators::{render, write_png, EyeLightIntegrator};
use rs_bvh::shapes::cuboid::Cuboid;
use rs_bvh::shapes::sphere::Sphere;
use rs_bvh::shapes::triangle::{TriangleMesh, TriangleMeshPrimitive};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build bounding volume hierarchies and shoot rays at them.
#[derive(Parser)]
#[command(name = "rs_bvh", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct BvhArgs {
    /// split method used to build the BVH ("sah", "middle" or "equal")
    #[arg(short = 's', long = "splitmethod", default_value = "sah")]
    split_method: String,
    /// maximum number of primitives per leaf
    #[arg(long = "maxnodeprims", default_value_t = 10)]
    max_node_prims: i32,
}

impl BvhArgs {
    fn param_set(&self) -> ParamSet {
        let mut ps: ParamSet = ParamSet::default();
        ps.add_string("splitmethod", &self.split_method);
        ps.add_int("maxnodeprims", self.max_node_prims);
        ps
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render a demo scene into a PNG file
    Render {
        #[command(flatten)]
        bvh: BvhArgs,
        /// use specified number of threads for rendering
        #[arg(short = 't', long = "nthreads", default_value_t = 0)]
        nthreads: usize,
        /// horizontal resolution
        #[arg(long, default_value_t = 640)]
        width: u32,
        /// vertical resolution
        #[arg(long, default_value_t = 360)]
        height: u32,
        /// camera rays per pixel
        #[arg(long, default_value_t = 1)]
        spp: u32,
        /// the path of the image to write
        #[arg(short = 'o', long, default_value = "rs_bvh.png")]
        output: PathBuf,
    },
    /// Time building a BVH over random spheres and tracing random rays
    Bench {
        #[command(flatten)]
        bvh: BvhArgs,
        /// number of spheres
        #[arg(short = 'n', long, default_value_t = 100_000)]
        primitives: usize,
        /// number of rays
        #[arg(short = 'm', long, default_value_t = 1_000_000)]
        rays: usize,
        /// seed of the random number generator
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn matte(kd: [Float; 3]) -> Option<Arc<dyn Material + Send + Sync>> {
    Some(Arc::new(MatteMaterial::new(kd)))
}

fn demo_scene() -> Vec<Arc<dyn Primitive + Send + Sync>> {
    let mut prims: Vec<Arc<dyn Primitive + Send + Sync>> = Vec::new();
    // ground plane
    let ground = TriangleMesh::ground_plane(
        &Point2f { x: -12.0, y: -12.0 },
        &Point2f { x: 12.0, y: 12.0 },
        0.0,
        8,
    );
    prims.push(Arc::new(TriangleMeshPrimitive::new(
        "ground",
        Arc::new(ground),
        matte([0.6, 0.6, 0.6]),
    )));
    // grid of spheres and boxes
    for i in 0..5 {
        for j in 0..5 {
            let x: Float = i as Float * 2.5 - 5.0;
            let z: Float = j as Float * 2.5 - 5.0;
            let kd: [Float; 3] = [i as Float / 4.0, 0.5, 1.0 - j as Float / 4.0];
            if (i + j) % 2 == 0 {
                let shape = Arc::new(Sphere::new(Point3f { x, y: 0.7, z }, 0.7));
                prims.push(Arc::new(GeometricPrimitive::new(
                    &format!("sphere_{}_{}", i, j),
                    shape,
                    matte(kd),
                )));
            } else {
                let shape = Arc::new(Cuboid::from_center(&Point3f { x, y: 0.5, z }, 1.0));
                prims.push(Arc::new(GeometricPrimitive::new(
                    &format!("box_{}_{}", i, j),
                    shape,
                    matte(kd),
                )));
            }
        }
    }
    // a small cluster in its own BVH, instanced twice
    let cluster: Vec<Arc<dyn Primitive + Send + Sync>> = (0..3)
        .map(|k| {
            let angle: Float = k as Float * 2.0 * std::f32::consts::PI / 3.0;
            let shape = Arc::new(Sphere::new(
                Point3f {
                    x: angle.cos() * 0.6,
                    y: 0.0,
                    z: angle.sin() * 0.6,
                },
                0.4,
            ));
            Arc::new(GeometricPrimitive::new(
                &format!("cluster/{}", k),
                shape,
                matte([0.9, 0.8, 0.2]),
            )) as Arc<dyn Primitive + Send + Sync>
        })
        .collect();
    let cluster: Arc<dyn Primitive + Send + Sync> =
        Arc::new(BVHAccel::new(cluster, 1, Default::default()).with_name("cluster"));
    for (k, x) in [-7.5 as Float, 7.5].iter().enumerate() {
        let placement: Transform = Transform::translate(&Vector3f {
            x: *x,
            y: 2.0,
            z: 0.0,
        }) * Transform::rotate_y(45.0 * k as Float);
        prims.push(Arc::new(TransformedPrimitive::new(
            &format!("cluster_instance_{}", k),
            cluster.clone(),
            placement,
        )));
    }
    prims
}

fn run_render(
    bvh_args: &BvhArgs,
    nthreads: usize,
    width: u32,
    height: u32,
    spp: u32,
    output: &Path,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let scene: BVHAccel =
        BVHAccel::try_create(demo_scene(), &bvh_args.param_set())?.with_name("scene");
    info!(
        "built BVH over {} primitives in {:?} ({} nodes, depth {})",
        scene.len(),
        start.elapsed(),
        scene.total_nodes(),
        scene.max_depth()
    );
    let camera = PinholeCamera::look_at(
        &Point3f {
            x: 0.0,
            y: 6.0,
            z: -14.0,
        },
        &Point3f {
            x: 0.0,
            y: 0.5,
            z: 0.0,
        },
        &Vector3f {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        },
        width,
        height,
        40.0,
    );
    let integrator = EyeLightIntegrator::new(
        Some(Point3f {
            x: 6.0,
            y: 12.0,
            z: -8.0,
        }),
        0.15,
    );
    let start = Instant::now();
    let film = render(&scene, &camera, &integrator, spp, nthreads)?;
    println!("Rendering took {:?}", start.elapsed());
    write_png(output, &film, width, height)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

fn random_point(rng: &mut Rng, extent: Float) -> Point3f {
    Point3f {
        x: rng.uniform_float_in(-extent, extent),
        y: rng.uniform_float_in(-extent, extent),
        z: rng.uniform_float_in(-extent, extent),
    }
}

fn run_bench(bvh_args: &BvhArgs, primitives: usize, rays: usize, seed: u64) -> anyhow::Result<()> {
    let mut rng: Rng = Rng::with_sequence(seed);
    // spread spheres so that the density stays about the same
    let extent: Float = (primitives as Float).cbrt() * 2.0;
    let prims: Vec<Arc<dyn Primitive + Send + Sync>> = (0..primitives)
        .map(|i| {
            let center: Point3f = random_point(&mut rng, extent);
            let radius: Float = rng.uniform_float_in(0.1, 1.0);
            Arc::new(GeometricPrimitive::new(
                &format!("sphere{}", i),
                Arc::new(Sphere::new(center, radius)),
                None,
            )) as Arc<dyn Primitive + Send + Sync>
        })
        .collect();
    let start = Instant::now();
    let bvh: BVHAccel = BVHAccel::try_create(prims, &bvh_args.param_set())?;
    let build_time = start.elapsed();
    println!(
        "{} build: {:?} for {} primitives, {} nodes, max depth {}",
        bvh.split_method(),
        build_time,
        bvh.len(),
        bvh.total_nodes(),
        bvh.max_depth()
    );
    let start = Instant::now();
    let (hits, occluded): (usize, usize) = (0..rays)
        .into_par_iter()
        .map(|i| {
            let mut rng: Rng = Rng::with_sequence(seed ^ (i as u64).wrapping_mul(0x9e37_79b9));
            let o: Point3f = random_point(&mut rng, extent * 1.5);
            let target: Point3f = random_point(&mut rng, extent);
            let mut ray: Ray = Ray::new(o, (target - o).normalize());
            let occluded: usize = bvh.intersect_p(&ray) as usize;
            let hit: usize = bvh.intersect(&mut ray).is_some() as usize;
            (hit, occluded)
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));
    let trace_time = start.elapsed();
    println!(
        "{} rays ({} hits, {} occluded) in {:?}: {:.0} rays/s",
        rays,
        hits,
        occluded,
        trace_time,
        (2 * rays) as f64 / trace_time.as_secs_f64().max(1e-9)
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    // handle command line options
    let args = Cli::parse();
    let num_cores = num_cpus::get();
    println!("rs_bvh version {} [Detected {} cores]", VERSION, num_cores);
    match args.command {
        Command::Render {
            bvh,
            nthreads,
            width,
            height,
            spp,
            output,
        } => run_render(&bvh, nthreads, width, height, spp, &output),
        Command::Bench {
            bvh,
            primitives,
            rays,
            seed,
        } => run_bench(&bvh, primitives, rays, seed),
    }
}
