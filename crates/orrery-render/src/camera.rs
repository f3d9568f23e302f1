//! Orbit camera kept in spherical coordinates around a look-at target.
//!
//! (θ, φ, radius, look_at) is the whole state. The eye position and both
//! matrices are derived from it on demand, so no input sequence can leave the
//! camera inconsistent: angles wrap or clamp and the radius clamps.

use glam::{Mat4, Vec3};
use orrery_math::{SphericalCoord, wrap_degrees, wrap_degrees_once};

/// Keeps φ just inside (0°, 180°) so the camera never flips over a pole.
pub const POLAR_MARGIN: f32 = 1.0 - f32::EPSILON;
pub const POLAR_MIN: f32 = POLAR_MARGIN;
pub const POLAR_MAX: f32 = 180.0 - POLAR_MARGIN;

pub const ZOOM_MIN: f32 = 0.05;
pub const ZOOM_MAX: f32 = 1000.0;

pub const FOV_Y_DEGREES: f32 = 60.0;
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 10_000.0;

pub const START_RADIUS: f32 = 50.0;
pub const START_THETA: f32 = 0.0;
pub const START_PHI: f32 = 90.0;

/// Matrices and eye position for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub view: Mat4,
    pub projection: Mat4,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphericalCamera {
    theta: f32,
    phi: f32,
    radius: f32,
    look_at: Vec3,
    aspect_ratio: f32,
}

impl Default for SphericalCamera {
    fn default() -> Self {
        Self {
            theta: START_THETA,
            phi: START_PHI,
            radius: START_RADIUS,
            look_at: Vec3::ZERO,
            aspect_ratio: 1.0,
        }
    }
}

impl SphericalCamera {
    /// Camera at the start position for a `width × height` viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self::default();
        camera.update_viewport(height, width);
        camera
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Rotate around the target. θ wraps into `[0, 360)`, φ is clamped.
    pub fn orbit(&mut self, delta_azimuth: f32, delta_polar: f32) {
        if delta_azimuth.is_finite() {
            let theta = wrap_degrees_once(self.theta + delta_azimuth);
            // A single correction covers per-frame deltas; oversized jumps take the slow path.
            self.theta = if (0.0..360.0).contains(&theta) {
                theta
            } else {
                wrap_degrees(theta)
            };
        }
        if delta_polar.is_finite() {
            self.phi = (self.phi + delta_polar).clamp(POLAR_MIN, POLAR_MAX);
        }
    }

    /// Move towards the target by `delta` (negative moves away), clamped to the zoom range.
    pub fn zoom(&mut self, delta: f32) {
        if delta.is_finite() {
            self.radius = (self.radius - delta).clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    /// Slide the target across the world XZ plane.
    ///
    /// Deltas are divided by the radius so close-up panning stays fine-grained.
    /// Screen-up (`delta_z > 0`) moves towards -Z; the target's height never changes.
    pub fn pan(&mut self, delta_x: f32, delta_z: f32) {
        if delta_x.is_finite() && delta_z.is_finite() {
            self.look_at += Vec3::new(delta_x / self.radius, 0.0, -delta_z / self.radius);
        }
    }

    /// Move the target to an absolute point.
    pub fn set_look_at(&mut self, target: Vec3) {
        self.look_at = target;
    }

    pub fn spherical(&self) -> SphericalCoord {
        SphericalCoord::new(self.theta, self.phi, self.radius)
    }

    /// Eye position in world space.
    pub fn cartesian_position(&self) -> Vec3 {
        self.spherical().to_cartesian() + self.look_at
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.cartesian_position(), self.look_at, Vec3::Y)
    }

    /// Right-handed perspective with a 0..1 depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect_ratio, Z_NEAR, Z_FAR)
    }

    /// Recompute the aspect ratio after a resize. A zero height keeps the old ratio.
    pub fn update_viewport(&mut self, height: u32, width: u32) {
        if height == 0 || width == 0 {
            return;
        }
        self.aspect_ratio = width as f32 / height as f32;
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            position: self.cartesian_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let camera = SphericalCamera::default();
        let p = camera.cartesian_position();
        assert_eq!(p.x, 0.0);
        assert!(p.y.abs() < 1e-4);
        assert!((p.z - START_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_wraps_past_360() {
        let mut camera = SphericalCamera::default();
        camera.orbit(350.0, 0.0);
        camera.orbit(30.0, 0.0);
        assert!((camera.theta() - 20.0).abs() < 1e-4, "theta {}", camera.theta());
    }

    #[test]
    fn test_orbit_wraps_below_zero() {
        let mut camera = SphericalCamera::default();
        camera.orbit(-10.0, 0.0);
        assert!((camera.theta() - 350.0).abs() < 1e-4);
    }

    #[test]
    fn test_full_turn_in_small_steps_returns_home() {
        for start in [0.0, 45.0, 181.0, 359.5] {
            let mut camera = SphericalCamera::default();
            camera.orbit(start, 0.0);
            for _ in 0..72 {
                camera.orbit(5.0, 0.0);
            }
            let diff = (camera.theta() - start).abs();
            assert!(diff < 1e-2 || (360.0 - diff) < 1e-2, "{start} -> {}", camera.theta());
            assert!((0.0..360.0).contains(&camera.theta()));
        }
    }

    #[test]
    fn test_oversized_orbit_stays_in_range() {
        let mut camera = SphericalCamera::default();
        camera.orbit(1000.0, 0.0);
        assert!((camera.theta() - 280.0).abs() < 1e-3);
        camera.orbit(-5000.0, 0.0);
        assert!((0.0..360.0).contains(&camera.theta()));
    }

    #[test]
    fn test_polar_clamped() {
        let mut camera = SphericalCamera::default();
        camera.orbit(0.0, 500.0);
        assert_eq!(camera.phi(), POLAR_MAX);
        assert!(camera.phi() < 180.0);
        camera.orbit(0.0, -1000.0);
        assert_eq!(camera.phi(), POLAR_MIN);
        assert!(camera.phi() > 0.0);
    }

    #[test]
    fn test_polar_clamp_under_many_deltas() {
        let mut camera = SphericalCamera::default();
        for i in 0..200 {
            let delta = if i % 3 == 0 { -37.0 } else { 29.0 };
            camera.orbit(0.0, delta);
            assert!((POLAR_MIN..=POLAR_MAX).contains(&camera.phi()));
        }
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = SphericalCamera::default();
        camera.zoom(2000.0);
        assert_eq!(camera.radius(), ZOOM_MIN);
        camera.zoom(-1e6);
        assert_eq!(camera.radius(), ZOOM_MAX);
        camera.zoom(10.0);
        assert_eq!(camera.radius(), ZOOM_MAX - 10.0);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut camera = SphericalCamera::default();
        camera.zoom(f32::NAN);
        camera.orbit(f32::INFINITY, f32::NAN);
        camera.pan(f32::NAN, 1.0);
        assert_eq!(camera, SphericalCamera::default());
    }

    #[test]
    fn test_pan_scales_with_radius() {
        let mut camera = SphericalCamera::default();
        camera.pan(50.0, 25.0);
        assert!(camera.look_at().abs_diff_eq(Vec3::new(1.0, 0.0, -0.5), 1e-6));

        camera.zoom(40.0); // radius 10
        camera.pan(10.0, 0.0);
        assert!((camera.look_at().x - 2.0).abs() < 1e-5);
        assert_eq!(camera.look_at().y, 0.0);
    }

    #[test]
    fn test_position_follows_target() {
        let mut camera = SphericalCamera::default();
        let before = camera.cartesian_position();
        camera.set_look_at(Vec3::new(3.0, 1.0, -2.0));
        let after = camera.cartesian_position();
        assert!((after - before).abs_diff_eq(Vec3::new(3.0, 1.0, -2.0), 1e-5));
    }

    #[test]
    fn test_inverse_conversion_recovers_state() {
        let mut camera = SphericalCamera::default();
        camera.orbit(123.0, -40.0);
        camera.zoom(20.0);
        camera.set_look_at(Vec3::new(5.0, -2.0, 1.0));
        let back = SphericalCoord::from_cartesian(camera.cartesian_position() - camera.look_at());
        assert!((back.theta - camera.theta()).abs() < 1e-2);
        assert!((back.phi - camera.phi()).abs() < 1e-2);
        assert!((back.radius - camera.radius()).abs() < 1e-3);
    }

    #[test]
    fn test_view_places_target_ahead() {
        let mut camera = SphericalCamera::default();
        camera.orbit(70.0, -30.0);
        let target_in_view = camera.view_matrix().transform_point3(camera.look_at());
        assert!(target_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -camera.radius()), 1e-3));
    }

    #[test]
    fn test_update_viewport_sets_aspect() {
        let mut camera = SphericalCamera::new(800, 600);
        assert!((camera.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
        camera.update_viewport(1080, 1920);
        assert!((camera.aspect_ratio() - 1920.0 / 1080.0).abs() < 1e-6);
        camera.update_viewport(0, 1920);
        assert!((camera.aspect_ratio() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = SphericalCamera::new(1024, 1024);
        let proj = camera.projection_matrix();
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -Z_NEAR));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -Z_FAR));
        assert!(near.z.abs() < 1e-4, "near maps to 0, got {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-4, "far maps to 1, got {}", far.z);
    }

    #[test]
    fn test_state_bundles_matrices() {
        let camera = SphericalCamera::new(640, 480);
        let state = camera.state();
        assert_eq!(state.view, camera.view_matrix());
        assert_eq!(state.projection, camera.projection_matrix());
        assert_eq!(state.position, camera.cartesian_position());
    }
}
