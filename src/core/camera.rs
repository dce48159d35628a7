//! The **Camera** trait defines the interface the renderer uses to
//! turn positions on the image plane into rays. The only
//! implementation is a simple pinhole camera.

// pbrt
use crate::core::geometry::{Point2f, Point3f, Ray, Vector3f};
use crate::core::pbrt::radians;
use crate::core::pbrt::Float;
use crate::core::transform::Transform;

// see camera.h

pub trait Camera {
    /// Primary ray through the film position of *sample* (in raster
    /// coordinates).
    fn generate_ray(&self, sample: &CameraSample) -> Ray;
    fn get_resolution(&self) -> (u32, u32);
}

#[derive(Debug, Default, Copy, Clone)]
pub struct CameraSample {
    pub p_film: Point2f,
}

/// Perspective projection without a lens. The field of view is
/// measured along the shorter image axis.
pub struct PinholeCamera {
    pub camera_to_world: Transform,
    pub x_resolution: u32,
    pub y_resolution: u32,
    screen_scale: Float,
}

impl PinholeCamera {
    pub fn new(camera_to_world: Transform, x_resolution: u32, y_resolution: u32, fov: Float) -> Self {
        PinholeCamera {
            camera_to_world,
            x_resolution,
            y_resolution,
            screen_scale: (radians(fov) * 0.5 as Float).tan(),
        }
    }
    pub fn look_at(
        pos: &Point3f,
        look: &Point3f,
        up: &Vector3f,
        x_resolution: u32,
        y_resolution: u32,
        fov: Float,
    ) -> Self {
        PinholeCamera::new(
            Transform::look_at(pos, look, up),
            x_resolution,
            y_resolution,
            fov,
        )
    }
}

impl Camera for PinholeCamera {
    fn generate_ray(&self, sample: &CameraSample) -> Ray {
        let xres: Float = self.x_resolution as Float;
        let yres: Float = self.y_resolution as Float;
        let short: Float = xres.min(yres);
        // raster to camera space; look_at puts +x to the left and +y up
        let sx: Float = (xres - 2.0 as Float * sample.p_film.x) / short * self.screen_scale;
        let sy: Float = (yres - 2.0 as Float * sample.p_film.y) / short * self.screen_scale;
        let dir: Vector3f = Vector3f {
            x: sx,
            y: sy,
            z: 1.0 as Float,
        }
        .normalize();
        self.camera_to_world.transform_ray(&Ray::new(Point3f::default(), dir))
    }
    fn get_resolution(&self) -> (u32, u32) {
        (self.x_resolution, self.y_resolution)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn center_ray_looks_at_target() {
        let camera = PinholeCamera::look_at(
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
            64,
            32,
            45.0,
        );
        let ray = camera.generate_ray(&CameraSample {
            p_film: Point2f { x: 32.0, y: 16.0 },
        });
        assert!((ray.o.z + 5.0).abs() < 1e-5);
        assert!((ray.d.z - 1.0).abs() < 1e-5);
        assert!(ray.d.x.abs() < 1e-5);
        // top rows look up
        let up = camera.generate_ray(&CameraSample {
            p_film: Point2f { x: 32.0, y: 0.0 },
        });
        assert!(up.d.y > 0.0);
        assert_eq!(camera.get_resolution(), (64, 32));
    }
}
