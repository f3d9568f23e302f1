//! Applies input commands to the camera and the animated system.

use orrery_config::{AnimationConfig, CameraConfig};
use orrery_input::ControlCommand;
use orrery_render::SphericalCamera;
use orrery_space::{AnimationSettings, SolarSystem};
use tracing::{debug, info};

/// Whether the frame loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// Apply one command. Sensitivities scale drag and scroll deltas; `invert_y`
/// flips the vertical component of orbit and pan.
pub fn apply_command(
    command: ControlCommand,
    camera: &mut SphericalCamera,
    system: &mut SolarSystem,
    config: &CameraConfig,
) -> CommandOutcome {
    let y_sign = if config.invert_y { -1.0 } else { 1.0 };
    match command {
        ControlCommand::Orbit { dx, dy } => {
            camera.orbit(
                dx * config.orbit_sensitivity,
                dy * config.orbit_sensitivity * y_sign,
            );
        }
        ControlCommand::Pan { dx, dz } => {
            camera.pan(
                dx * config.pan_sensitivity,
                dz * config.pan_sensitivity * y_sign,
            );
        }
        ControlCommand::Zoom(amount) => {
            camera.zoom(amount * config.zoom_sensitivity);
        }
        ControlCommand::ToggleAnimation => {
            system.toggle_animation();
            info!(animating = system.is_animating(), "animation toggled");
        }
        ControlCommand::SetFastForward(on) => {
            system.set_fast_forward(on);
            debug!(fast_forward = on, "fast-forward");
        }
        ControlCommand::Quit => return CommandOutcome::Quit,
    }
    CommandOutcome::Continue
}

pub fn animation_settings(config: &AnimationConfig) -> AnimationSettings {
    AnimationSettings {
        time_scale: config.time_scale,
        fast_forward_multiplier: config.fast_forward_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use orrery_render::{ZOOM_MAX, ZOOM_MIN};
    use orrery_space::{BodyTextures, STAR_SPHERE_RADIUS};

    fn setup() -> (SphericalCamera, SolarSystem) {
        let system = SolarSystem::new(
            &BodyTextures::default(),
            AnimationSettings::default(),
            true,
            Instant::now(),
        )
        .unwrap();
        (SphericalCamera::new(800, 800), system)
    }

    #[test]
    fn test_star_sphere_fits_zoom_range() {
        assert_eq!(STAR_SPHERE_RADIUS, ZOOM_MAX);
    }

    #[test]
    fn test_orbit_wraps_and_scales() {
        let (mut camera, mut system) = setup();
        let config = CameraConfig {
            orbit_sensitivity: 2.0,
            ..CameraConfig::default()
        };
        let outcome = apply_command(
            ControlCommand::Orbit { dx: -15.0, dy: 5.0 },
            &mut camera,
            &mut system,
            &config,
        );
        assert_eq!(outcome, CommandOutcome::Continue);
        assert!((camera.theta() - 330.0).abs() < 1e-4);
        assert!((camera.phi() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_invert_y_flips_vertical() {
        let (mut camera, mut system) = setup();
        let config = CameraConfig {
            invert_y: true,
            ..CameraConfig::default()
        };
        apply_command(
            ControlCommand::Orbit { dx: 0.0, dy: 10.0 },
            &mut camera,
            &mut system,
            &config,
        );
        assert!((camera.phi() - 80.0).abs() < 1e-4);

        apply_command(
            ControlCommand::Pan { dx: 0.0, dz: 50.0 },
            &mut camera,
            &mut system,
            &config,
        );
        // radius 50: dz / r = 1, negated by pan then flipped by invert_y
        assert!((camera.look_at().z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pan_moves_look_at() {
        let (mut camera, mut system) = setup();
        apply_command(
            ControlCommand::Pan { dx: 25.0, dz: 50.0 },
            &mut camera,
            &mut system,
            &CameraConfig::default(),
        );
        let look_at = camera.look_at();
        assert!((look_at.x - 0.5).abs() < 1e-5);
        assert_eq!(look_at.y, 0.0);
        assert!((look_at.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_clamps() {
        let (mut camera, mut system) = setup();
        let config = CameraConfig::default();
        apply_command(ControlCommand::Zoom(2000.0), &mut camera, &mut system, &config);
        assert_eq!(camera.radius(), ZOOM_MIN);
        apply_command(ControlCommand::Zoom(-5000.0), &mut camera, &mut system, &config);
        assert_eq!(camera.radius(), ZOOM_MAX);
    }

    #[test]
    fn test_animation_commands() {
        let (mut camera, mut system) = setup();
        let config = CameraConfig::default();
        apply_command(ControlCommand::ToggleAnimation, &mut camera, &mut system, &config);
        assert!(!system.is_animating());
        apply_command(ControlCommand::ToggleAnimation, &mut camera, &mut system, &config);
        assert!(system.is_animating());

        apply_command(ControlCommand::SetFastForward(true), &mut camera, &mut system, &config);
        assert!(system.bodies().all(|(_, b)| b.motion().is_fast_forward()));
        apply_command(ControlCommand::SetFastForward(false), &mut camera, &mut system, &config);
        assert!(system.bodies().all(|(_, b)| !b.motion().is_fast_forward()));
    }

    #[test]
    fn test_quit() {
        let (mut camera, mut system) = setup();
        let before = camera.clone();
        let outcome = apply_command(
            ControlCommand::Quit,
            &mut camera,
            &mut system,
            &CameraConfig::default(),
        );
        assert_eq!(outcome, CommandOutcome::Quit);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_animation_settings_from_config() {
        let settings = animation_settings(&AnimationConfig {
            start_animated: false,
            time_scale: 0.5,
            fast_forward_multiplier: 4.0,
        });
        assert_eq!(settings.time_scale, 0.5);
        assert_eq!(settings.fast_forward_multiplier, 4.0);
    }
}
