//! A tiny multithreaded renderer to look at what the acceleration
//! structure returns.
//!
//! The **EyeLightIntegrator** shoots one nearest-hit ray per camera
//! sample and shades the hit point with the material's reflectance,
//! a cosine falloff towards a point light and a shadow ray
//! (occlusion query) towards that light. Surfaces facing away from
//! the light or in shadow only receive an ambient term.
//!
//! **render()** splits the image into tiles, works through them with
//! one thread per core and merges the finished tiles on the calling
//! thread, while queries run concurrently against the shared,
//! immutable scene.

// std
use std::path::Path;
// others
use tracing::{info, warn};
// pbrt
use crate::blockqueue::{BlockQueue, TileBounds};
use crate::core::camera::{Camera, CameraSample};
use crate::core::error::{Error, Result};
use crate::core::geometry::{nrm_dot_vec3f, nrm_faceforward_vec3};
use crate::core::geometry::{Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::pbrt::{clamp_t, gamma_correct, Float};
use crate::core::primitive::Primitive;
use crate::core::rng::Rng;

pub const TILE_SIZE: u32 = 16;

pub struct EyeLightIntegrator {
    /// point light position, `None` puts the light at the eye
    pub light: Option<Point3f>,
    pub ambient: Float,
    pub background: [Float; 3],
}

impl Default for EyeLightIntegrator {
    fn default() -> Self {
        EyeLightIntegrator {
            light: None,
            ambient: 0.1 as Float,
            background: [0.05 as Float; 3],
        }
    }
}

impl EyeLightIntegrator {
    pub fn new(light: Option<Point3f>, ambient: Float) -> Self {
        EyeLightIntegrator {
            light,
            ambient: clamp_t(ambient, 0.0 as Float, 1.0 as Float),
            ..Default::default()
        }
    }
    /// Returns the (linear RGB) radiance arriving along *ray*.
    pub fn li(&self, ray: &mut Ray, scene: &dyn Primitive) -> [Float; 3] {
        let isect = match scene.intersect(ray) {
            Some(isect) => isect,
            None => return self.background,
        };
        let kd: [Float; 3] = match isect.material {
            Some(ref material) => material.reflectance(&isect.uv),
            None => [0.5 as Float; 3],
        };
        let wo: Vector3f = -ray.d;
        let n: Normal3f = nrm_faceforward_vec3(&isect.shading.n, &wo);
        let light_pos: Point3f = self.light.unwrap_or(ray.o);
        let wi: Vector3f = light_pos - isect.p;
        let mut direct: Float = 0.0 as Float;
        if wi.length_squared() > 0.0 as Float {
            let cos_theta: Float = nrm_dot_vec3f(&n, &wi.normalize());
            if cos_theta > 0.0 as Float {
                // shadow ray
                let shadow: Ray = isect.spawn_ray_to(&light_pos);
                if !scene.intersect_p(&shadow) {
                    direct = cos_theta;
                }
            }
        }
        let shade: Float = self.ambient + (1.0 as Float - self.ambient) * direct;
        [kd[0] * shade, kd[1] * shade, kd[2] * shade]
    }
}

/// **Main function** to **render** a scene multi-threaded. Returns
/// the linear RGB values of all pixels (row by row, three floats
/// per pixel).
pub fn render(
    scene: &(dyn Primitive + Send + Sync),
    camera: &(dyn Camera + Send + Sync),
    integrator: &EyeLightIntegrator,
    samples_per_pixel: u32,
    num_threads: usize,
) -> Result<Vec<Float>> {
    let (x_resolution, y_resolution) = camera.get_resolution();
    let samples_per_pixel: u32 = samples_per_pixel.max(1);
    let num_cores: usize = if num_threads == 0 {
        num_cpus::get()
    } else {
        num_threads
    };
    info!(
        "rendering {}x{} pixels ({} spp) with {} thread(s)",
        x_resolution, y_resolution, samples_per_pixel, num_cores
    );
    let mut film: Vec<Float> = vec![0.0 as Float; (x_resolution * y_resolution * 3) as usize];
    {
        let block_queue = BlockQueue::new((x_resolution, y_resolution), (TILE_SIZE, TILE_SIZE));
        let bq = &block_queue;
        let film = &mut film;
        crossbeam::scope(|scope| {
            let (pixel_tx, pixel_rx) = crossbeam_channel::bounded(num_cores);
            // spawn worker threads
            for _ in 0..num_cores {
                let pixel_tx = pixel_tx.clone();
                scope.spawn(move |_| {
                    while let Some(block) = bq.next() {
                        let tile: TileBounds = bq.tile_bounds(block);
                        let pixels: Vec<[Float; 3]> =
                            render_tile(scene, camera, integrator, &tile, samples_per_pixel);
                        // send the tile through the channel to main thread
                        if pixel_tx.send((tile, pixels)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(pixel_tx);
            // collect tiles and merge them into the film
            for _ in pbr::PbIter::new(0..bq.len()) {
                let (tile, pixels) = match pixel_rx.recv() {
                    Ok(received) => received,
                    Err(_) => break,
                };
                let mut i: usize = 0;
                for y in tile.y0..tile.y1 {
                    for x in tile.x0..tile.x1 {
                        let offset: usize = ((y * x_resolution + x) * 3) as usize;
                        film[offset..(offset + 3)].copy_from_slice(&pixels[i]);
                        i += 1;
                    }
                }
            }
        })
        .map_err(|_| Error::WorkerPanicked)?;
    }
    Ok(film)
}

fn render_tile(
    scene: &(dyn Primitive + Send + Sync),
    camera: &(dyn Camera + Send + Sync),
    integrator: &EyeLightIntegrator,
    tile: &TileBounds,
    samples_per_pixel: u32,
) -> Vec<[Float; 3]> {
    // jitter is reproducible per tile
    let mut rng: Rng = Rng::with_sequence(((tile.y0 as u64) << 32) | tile.x0 as u64);
    let inv_spp: Float = 1.0 as Float / samples_per_pixel as Float;
    let mut pixels: Vec<[Float; 3]> = Vec::with_capacity(tile.area());
    for y in tile.y0..tile.y1 {
        for x in tile.x0..tile.x1 {
            let mut l: [Float; 3] = [0.0 as Float; 3];
            for _ in 0..samples_per_pixel {
                let (dx, dy) = if samples_per_pixel == 1 {
                    (0.5 as Float, 0.5 as Float)
                } else {
                    (rng.uniform_float(), rng.uniform_float())
                };
                let camera_sample: CameraSample = CameraSample {
                    p_film: Point2f {
                        x: x as Float + dx,
                        y: y as Float + dy,
                    },
                };
                let mut ray: Ray = camera.generate_ray(&camera_sample);
                let c: [Float; 3] = integrator.li(&mut ray, scene);
                if c.iter().any(|v| v.is_nan()) {
                    warn!(
                        "not-a-number radiance value returned for pixel ({}, {}), setting to black",
                        x, y
                    );
                    continue;
                }
                for (li, ci) in l.iter_mut().zip(c.iter()) {
                    *li += ci * inv_spp;
                }
            }
            pixels.push(l);
        }
    }
    pixels
}

/// Gamma corrects linear RGB values and quantizes them to 8 bits.
pub fn to_rgb8(film: &[Float]) -> Vec<u8> {
    film.iter()
        .map(|v| clamp_t(255.0 as Float * gamma_correct(*v) + 0.5, 0.0, 255.0) as u8)
        .collect()
}

pub fn write_png(path: &Path, film: &[Float], width: u32, height: u32) -> Result<()> {
    let buffer: Vec<u8> = to_rgb8(film);
    image::save_buffer(path, &buffer, width, height, image::ColorType::Rgb8)?;
    info!("wrote {}x{} image to {:?}", width, height, path);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::accelerators::bvh::{BVHAccel, SplitMethod};
    use crate::core::camera::PinholeCamera;
    use crate::core::material::MatteMaterial;
    use crate::core::primitive::GeometricPrimitive;
    use crate::shapes::cuboid::Cuboid;
    use crate::shapes::sphere::Sphere;
    use std::sync::Arc;

    fn red_sphere() -> Arc<dyn Primitive + Send + Sync> {
        let shape = Arc::new(Sphere::new(Point3f::default(), 1.0));
        Arc::new(GeometricPrimitive::new(
            "sphere",
            shape,
            Some(Arc::new(MatteMaterial::new([1.0, 0.0, 0.0]))),
        ))
    }

    fn camera(xres: u32, yres: u32) -> PinholeCamera {
        PinholeCamera::look_at(
            &Point3f {
                x: 0.0,
                y: 0.0,
                z: -5.0,
            },
            &Point3f::default(),
            &Vector3f {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            xres,
            yres,
            45.0,
        )
    }

    #[test]
    fn eye_light_shades_hit_and_background() {
        let scene = BVHAccel::new(vec![red_sphere()], 4, SplitMethod::SAH);
        let integrator = EyeLightIntegrator::default();
        let mut ray = Ray::new(
            Point3f {
                x: 0.0,
                y: 0.0,
                z: -5.0,
            },
            Vector3f {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
        );
        let c = integrator.li(&mut ray, &scene);
        // light at the eye, head-on hit
        assert!((c[0] - 1.0).abs() < 1e-3);
        assert_eq!(c[1], 0.0);
        let mut miss = Ray::new(
            Point3f {
                x: 0.0,
                y: 5.0,
                z: -5.0,
            },
            Vector3f {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
        );
        assert_eq!(integrator.li(&mut miss, &scene), integrator.background);
    }

    #[test]
    fn blocked_light_leaves_ambient() {
        let blocker: Arc<dyn Primitive + Send + Sync> = Arc::new(GeometricPrimitive::new(
            "blocker",
            Arc::new(Cuboid::from_center(
                &Point3f {
                    x: 0.0,
                    y: 3.0,
                    z: 0.0,
                },
                1.0,
            )),
            None,
        ));
        let scene = BVHAccel::new(vec![red_sphere(), blocker], 4, SplitMethod::SAH);
        let integrator = EyeLightIntegrator::new(
            Some(Point3f {
                x: 0.0,
                y: 6.0,
                z: 0.0,
            }),
            0.25,
        );
        let mut ray = Ray::new(
            Point3f {
                x: 0.0,
                y: 5.0,
                z: 0.0,
            },
            Vector3f {
                x: 0.0,
                y: -1.0,
                z: 0.0,
            },
        );
        // hits the top of the blocker, which sees the light
        let lit = integrator.li(&mut ray, &scene);
        assert!((lit[0] - 0.5).abs() < 1e-3);
        let mut ray = Ray::new(
            Point3f {
                x: 0.0,
                y: 0.0,
                z: -5.0,
            },
            Vector3f {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
        );
        // the sphere's front faces away from the light
        let c = integrator.li(&mut ray, &scene);
        assert!((c[0] - 0.25).abs() < 1e-3);
    }

    #[test]
    fn render_fills_every_pixel() {
        let scene = BVHAccel::new(vec![red_sphere()], 4, SplitMethod::Middle);
        let camera = camera(37, 21);
        let film = render(&scene, &camera, &EyeLightIntegrator::default(), 1, 3).unwrap();
        assert_eq!(film.len(), 37 * 21 * 3);
        // center pixel sees the sphere, corner pixel the background
        let center: usize = ((10 * 37 + 18) * 3) as usize;
        assert!(film[center] > 0.5);
        assert_eq!(film[center + 1], 0.0);
        assert_eq!(film[0], 0.05);
        let rgb = to_rgb8(&film);
        assert_eq!(rgb.len(), film.len());
        assert!(rgb[center] > 200);
    }
}
