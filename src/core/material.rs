//! A material describes how light interacts with a surface. The ray
//! tracer only needs two pieces of information from it: a diffuse
//! reflectance for the simple shading of the demo renderer, and an
//! alpha value used to cut holes into triangle meshes.

// pbrt
use crate::core::geometry::Point2f;
use crate::core::pbrt::Float;

// see material.h

/// **Material** defines the interface that material implementations
/// must provide.
pub trait Material {
    /// Diffuse reflectance (RGB) at the given texture coordinates.
    fn reflectance(&self, uv: &Point2f) -> [Float; 3];
    /// Opacity at the given texture coordinates. Hits on surfaces
    /// with an alpha below 0.1 are ignored by triangles.
    fn alpha(&self, _uv: &Point2f) -> Float {
        1.0 as Float
    }
}

/// A constant diffuse color with an optional constant alpha.
#[derive(Debug, Copy, Clone)]
pub struct MatteMaterial {
    pub kd: [Float; 3],
    pub alpha: Float,
}

impl MatteMaterial {
    pub fn new(kd: [Float; 3]) -> Self {
        MatteMaterial {
            kd,
            alpha: 1.0 as Float,
        }
    }
    pub fn with_alpha(kd: [Float; 3], alpha: Float) -> Self {
        MatteMaterial { kd, alpha }
    }
}

impl Default for MatteMaterial {
    fn default() -> Self {
        MatteMaterial::new([0.5 as Float; 3])
    }
}

impl Material for MatteMaterial {
    fn reflectance(&self, _uv: &Point2f) -> [Float; 3] {
        self.kd
    }
    fn alpha(&self, _uv: &Point2f) -> Float {
        self.alpha
    }
}
