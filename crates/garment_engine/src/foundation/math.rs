//! Math utilities and types
//!
//! Provides the vector types and spherical coordinates used by the camera
//! and bounding-volume code.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Smallest polar angle kept away from the poles by orbit math
    pub const POLAR_EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Spherical coordinates around an origin
///
/// Uses the Y-up convention of the viewer:
/// - `radius` is the distance from the origin
/// - `phi` is the polar angle measured from +Y (0 = straight up)
/// - `theta` is the azimuth around +Y, measured from +Z towards +X
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin
    pub radius: f32,
    /// Polar angle from +Y in radians
    pub phi: f32,
    /// Azimuthal angle around +Y in radians
    pub theta: f32,
}

impl Spherical {
    /// Create spherical coordinates from components
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a cartesian offset into spherical coordinates
    pub fn from_vec3(v: &Vec3) -> Self {
        let radius = v.norm();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Convert back into a cartesian offset
    pub fn to_vec3(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Clamp the polar angle into `[margin, PI - margin]`
    pub fn clamp_phi(&mut self, margin: f32) {
        self.phi = self.phi.clamp(margin, constants::PI - margin);
    }
}
