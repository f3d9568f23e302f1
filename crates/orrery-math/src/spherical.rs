//! Physics-convention spherical coordinates in degrees.
//!
//! θ is the azimuth measured from +Z towards +X, φ is the polar angle
//! measured down from +Y. The conversion is
//!
//! ```text
//! x = r · sin φ · sin θ
//! y = r · cos φ
//! z = r · sin φ · cos θ
//! ```

use glam::Vec3;

use crate::angle::wrap_degrees;

/// Magnitude below which a Cartesian component is snapped to exactly zero.
pub const SNAP_EPSILON: f32 = f32::EPSILON;

/// Snap near-zero components to `0.0` so axis-aligned positions stay exact.
pub fn snap_to_zero(v: Vec3) -> Vec3 {
    let snap = |c: f32| if c.abs() < SNAP_EPSILON { 0.0 } else { c };
    Vec3::new(snap(v.x), snap(v.y), snap(v.z))
}

/// A point on a sphere expressed as (θ azimuth, φ polar, radius).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCoord {
    /// Azimuth in degrees.
    pub theta: f32,
    /// Polar angle in degrees, 0 at +Y and 180 at -Y.
    pub phi: f32,
    pub radius: f32,
}

impl SphericalCoord {
    pub fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self { theta, phi, radius }
    }

    /// Cartesian offset from the sphere centre, with near-zero components snapped.
    pub fn to_cartesian(self) -> Vec3 {
        let (sin_theta, cos_theta) = self.theta.to_radians().sin_cos();
        let (sin_phi, cos_phi) = self.phi.to_radians().sin_cos();
        snap_to_zero(Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        ))
    }

    /// Inverse of [`to_cartesian`](Self::to_cartesian).
    ///
    /// The zero vector maps to radius 0 with θ = 0 and φ = 0. On the polar
    /// axis θ is undefined and reported as 0.
    pub fn from_cartesian(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= SNAP_EPSILON {
            return Self::new(0.0, 0.0, 0.0);
        }
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos().to_degrees();
        let theta = wrap_degrees(offset.x.atan2(offset.z).to_degrees());
        Self::new(theta, phi, radius)
    }
}
