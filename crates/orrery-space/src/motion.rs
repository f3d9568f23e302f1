//! Per-body spin and orbit state advanced by wall-clock time.

use std::time::Instant;

use glam::Mat4;
use orrery_math::wrap_degrees;

/// Rate multiplier applied while fast-forward is held.
pub const FAST_FORWARD_MULTIPLIER: f32 = 50.0;

/// Fraction of a real second that counts as one simulated second.
pub const TIME_SCALE: f32 = 1.0 / 40.0;

/// Global knobs for how fast simulated time runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    pub time_scale: f32,
    pub fast_forward_multiplier: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            time_scale: TIME_SCALE,
            fast_forward_multiplier: FAST_FORWARD_MULTIPLIER,
        }
    }
}

/// Angles applied by one call to [`BodyMotion::advance`], in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionStep {
    pub spin_delta: f32,
    pub orbit_delta: f32,
}

impl MotionStep {
    /// Incremental orbit rotation about +Y, ready for `accumulate_rotation`.
    pub fn orbit_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.orbit_delta.to_radians())
    }
}

/// Spin angle, rates and animation flags for a single body.
#[derive(Clone, Debug)]
pub struct BodyMotion {
    rotation_rate: f32,
    orbit_rate: f32,
    spin: f32,
    animate: bool,
    fast_forward: bool,
    last_tick: Instant,
}

impl BodyMotion {
    /// Motion completing one spin every `seconds_per_rotation` and one orbit
    /// every `seconds_per_orbit`. A period of zero means stationary.
    pub fn new(seconds_per_rotation: f32, seconds_per_orbit: f32, now: Instant) -> Self {
        Self {
            rotation_rate: rate_from_period(seconds_per_rotation),
            orbit_rate: rate_from_period(seconds_per_orbit),
            spin: 0.0,
            animate: true,
            fast_forward: false,
            last_tick: now,
        }
    }

    /// Degrees per second of axial spin.
    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Degrees per second around the parent.
    pub fn orbit_rate(&self) -> f32 {
        self.orbit_rate
    }

    /// Current spin angle in `[0, 360)`.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn is_animating(&self) -> bool {
        self.animate
    }

    pub fn is_fast_forward(&self) -> bool {
        self.fast_forward
    }

    pub fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
    }

    pub fn toggle_animate(&mut self) {
        self.animate = !self.animate;
    }

    pub fn set_fast_forward(&mut self, fast_forward: bool) {
        self.fast_forward = fast_forward;
    }

    /// Local spin about the body's own +Y axis.
    pub fn local_spin_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin.to_radians())
    }

    /// Advance to `now`.
    ///
    /// The clock always moves forward, so pausing and resuming never makes the
    /// body jump. Returns `None` while paused.
    pub fn advance(&mut self, now: Instant, settings: &AnimationSettings) -> Option<MotionStep> {
        let elapsed = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        if !self.animate {
            return None;
        }

        let mut scale = elapsed * settings.time_scale;
        if self.fast_forward {
            scale *= settings.fast_forward_multiplier;
        }

        let step = MotionStep {
            spin_delta: self.rotation_rate * scale,
            orbit_delta: self.orbit_rate * scale,
        };
        self.spin = wrap_degrees(self.spin + step.spin_delta);
        Some(step)
    }
}

/// `360 / seconds`, or zero for a non-positive or non-finite period.
pub fn rate_from_period(seconds: f32) -> f32 {
    if seconds.is_finite() && seconds > 0.0 {
        360.0 / seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn unscaled() -> AnimationSettings {
        AnimationSettings {
            time_scale: 1.0,
            fast_forward_multiplier: 10.0,
        }
    }

    #[test]
    fn test_rates_from_periods() {
        let start = Instant::now();
        let motion = BodyMotion::new(36.0, 0.0, start);
        assert!((motion.rotation_rate() - 10.0).abs() < 1e-5);
        assert_eq!(motion.orbit_rate(), 0.0);
        assert_eq!(rate_from_period(-3.0), 0.0);
        assert_eq!(rate_from_period(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_advance_spins_by_elapsed_time() {
        let start = Instant::now();
        let mut motion = BodyMotion::new(36.0, 360.0, start);
        let step = motion.advance(start + Duration::from_secs(2), &unscaled()).unwrap();
        assert!((step.spin_delta - 20.0).abs() < 1e-4);
        assert!((step.orbit_delta - 2.0).abs() < 1e-4);
        assert!((motion.spin() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_default_time_scale_slows_motion() {
        let start = Instant::now();
        let mut motion = BodyMotion::new(1.0, 0.0, start);
        let settings = AnimationSettings::default();
        let step = motion.advance(start + Duration::from_secs(1), &settings).unwrap();
        assert!((step.spin_delta - 360.0 / 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_spin_wraps() {
        let start = Instant::now();
        let mut motion = BodyMotion::new(10.0, 0.0, start);
        motion.advance(start + Duration::from_secs(25), &unscaled());
        assert!((motion.spin() - 180.0).abs() < 1e-2, "spin {}", motion.spin());
        assert!(motion.spin() < 360.0);
    }

    #[test]
    fn test_fast_forward_multiplies_rates() {
        let start = Instant::now();
        let mut motion = BodyMotion::new(360.0, 360.0, start);
        motion.set_fast_forward(true);
        let step = motion.advance(start + Duration::from_secs(1), &unscaled()).unwrap();
        assert!((step.spin_delta - 10.0).abs() < 1e-4);
        assert!((step.orbit_delta - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_paused_body_still_resets_clock() {
        let start = Instant::now();
        let mut motion = BodyMotion::new(36.0, 36.0, start);
        motion.set_animate(false);
        assert!(motion.advance(start + Duration::from_secs(100), &unscaled()).is_none());
        assert_eq!(motion.spin(), 0.0);

        motion.toggle_animate();
        let step = motion
            .advance(start + Duration::from_secs(101), &unscaled())
            .unwrap();
        // Only the second since resuming counts.
        assert!((step.spin_delta - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_clock_going_backwards_is_zero_elapsed() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut motion = BodyMotion::new(36.0, 0.0, start);
        let step = motion.advance(start - Duration::from_secs(5), &unscaled()).unwrap();
        assert_eq!(step.spin_delta, 0.0);
    }

    #[test]
    fn test_orbit_matrix_rotates_about_y() {
        let step = MotionStep {
            spin_delta: 0.0,
            orbit_delta: 90.0,
        };
        let p = step.orbit_matrix().transform_point3(glam::Vec3::X);
        assert!(p.abs_diff_eq(glam::Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_local_spin_matrix_tracks_spin() {
        let start = Instant::now();
        let mut motion = BodyMotion::new(4.0, 0.0, start);
        motion.advance(start + Duration::from_secs(1), &unscaled());
        let expected = Mat4::from_rotation_y(90f32.to_radians());
        assert!(motion.local_spin_matrix().abs_diff_eq(expected, 1e-5));
    }
}
