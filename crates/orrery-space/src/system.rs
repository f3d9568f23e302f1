//! Scene setup for the sun, earth, moon and the surrounding star sphere.
//!
//! Sizes and distances are compressed logarithmically so all three bodies fit
//! on screen at once: `log_scale(x) = ln(x) / ln(10^7)`.

use std::time::Instant;

use glam::Vec3;
use orrery_mesh::MeshError;
use orrery_scene::{NodeId, SceneGraph};
use tracing::{debug, info};

use crate::body::{BodyDescriptor, BodyFrame, CelestialBody};
use crate::motion::AnimationSettings;

/// Radius of the star sphere. Equal to the camera's maximum zoom distance.
pub const STAR_SPHERE_RADIUS: f32 = 1000.0;

const SUN_RADIUS: f32 = 8.0;
const SUN_RADIUS_KM: f32 = 696_000.0;
const EARTH_RADIUS_KM: f32 = 6_378.1;
const MOON_RADIUS_KM: f32 = 1_737.1;
const SUN_EARTH_KM: f32 = 149_597_890.0;
const EARTH_MOON_KM: f32 = 384_399.0;
const MOON_INCLINATION_DEG: f32 = 23.5;

/// Compress `x` into a small range: `ln(x) / ln(10^7)`.
pub fn log_scale(x: f32) -> f32 {
    x.ln() / 1.0e7_f32.ln()
}

/// Which of the four bodies an entry in [`SolarSystem::bodies`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Sun,
    Earth,
    Moon,
    Stars,
}

impl BodyKind {
    /// Draw order.
    pub const ALL: [BodyKind; 4] = [Self::Sun, Self::Earth, Self::Moon, Self::Stars];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Earth => "earth",
            Self::Moon => "moon",
            Self::Stars => "stars",
        }
    }
}

/// Texture file names for each body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyTextures {
    pub sun: String,
    pub earth: String,
    pub moon: String,
    pub stars: String,
}

impl Default for BodyTextures {
    fn default() -> Self {
        Self {
            sun: "texture_sun.jpg".to_string(),
            earth: "earth_surface.jpg".to_string(),
            moon: "texture_moon.jpg".to_string(),
            stars: "texture_stars.jpg".to_string(),
        }
    }
}

impl BodyTextures {
    pub fn get(&self, kind: BodyKind) -> &str {
        match kind {
            BodyKind::Sun => &self.sun,
            BodyKind::Earth => &self.earth,
            BodyKind::Moon => &self.moon,
            BodyKind::Stars => &self.stars,
        }
    }
}

/// Derived radii and offsets of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub sun_radius: f32,
    pub earth_radius: f32,
    pub moon_radius: f32,
    pub sun_earth_distance: f32,
    pub earth_moon_distance: f32,
    pub moon_y_offset: f32,
}

impl SceneLayout {
    pub fn compute() -> Self {
        let scaled_sun = log_scale(SUN_RADIUS_KM);
        let scaled_earth = log_scale(EARTH_RADIUS_KM);
        let scaled_moon = log_scale(MOON_RADIUS_KM);

        let earth_radius = scaled_sun * (scaled_sun / scaled_earth);
        let moon_radius = scaled_earth * (scaled_earth / scaled_moon);
        let sun_earth_distance = SUN_RADIUS + SUN_RADIUS * log_scale(SUN_EARTH_KM);
        let earth_moon_distance = earth_radius + earth_radius * log_scale(EARTH_MOON_KM);
        let moon_y_offset = log_scale(MOON_INCLINATION_DEG).sin() * earth_moon_distance;

        Self {
            sun_radius: SUN_RADIUS,
            earth_radius,
            moon_radius,
            sun_earth_distance,
            earth_moon_distance,
            moon_y_offset,
        }
    }

    /// Descriptor for `kind`, using `texture` as its file name.
    pub fn descriptor(&self, kind: BodyKind, texture: &str) -> BodyDescriptor {
        let (radius, tilt, rotation, orbit, lit) = match kind {
            BodyKind::Sun => (self.sun_radius, log_scale(7.25), 25.38, 0.0, false),
            BodyKind::Earth => (self.earth_radius, log_scale(23.4), 0.997_269_8, 365.0, true),
            BodyKind::Moon => (self.moon_radius, log_scale(6.68), 27.321_582, 27.321_582, true),
            BodyKind::Stars => (STAR_SPHERE_RADIUS, log_scale(180.0), 0.0, 0.0, false),
        };
        BodyDescriptor {
            name: kind.name().to_string(),
            radius,
            texture: texture.to_string(),
            axial_tilt_degrees: tilt,
            seconds_per_rotation: rotation,
            seconds_per_orbit: orbit,
            lit,
        }
    }
}

/// Owns the scene graph and the four bodies placed in it.
pub struct SolarSystem {
    graph: SceneGraph,
    bodies: Vec<(BodyKind, CelestialBody)>,
    settings: AnimationSettings,
    layout: SceneLayout,
}

impl SolarSystem {
    /// Build the graph (sun under the root, earth under the sun, moon under the
    /// earth) and create every body. The star sphere shares the sun's node.
    pub fn new(
        textures: &BodyTextures,
        settings: AnimationSettings,
        start_animated: bool,
        now: Instant,
    ) -> Result<Self, MeshError> {
        let layout = SceneLayout::compute();
        let mut graph = SceneGraph::new();

        let sun = graph.add(Vec3::ZERO, None);
        let earth = graph.add(Vec3::new(layout.sun_earth_distance, 0.0, 0.0), Some(sun));
        let moon = graph.add(
            Vec3::new(layout.earth_moon_distance, layout.moon_y_offset, 0.0),
            Some(earth),
        );

        let mut bodies = Vec::with_capacity(BodyKind::ALL.len());
        for kind in BodyKind::ALL {
            let node = match kind {
                BodyKind::Sun | BodyKind::Stars => sun,
                BodyKind::Earth => earth,
                BodyKind::Moon => moon,
            };
            let descriptor = layout.descriptor(kind, textures.get(kind));
            debug!(body = kind.name(), radius = descriptor.radius, "creating body");
            let mut body = CelestialBody::new(descriptor, node, &mut graph, now)?;
            body.motion_mut().set_animate(start_animated);
            bodies.push((kind, body));
        }

        info!(
            earth_distance = layout.sun_earth_distance,
            moon_distance = layout.earth_moon_distance,
            "solar system ready"
        );

        Ok(Self {
            graph,
            bodies,
            settings,
            layout,
        })
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyKind, &CelestialBody)> {
        self.bodies.iter().map(|(kind, body)| (*kind, body))
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyKind, &mut CelestialBody)> {
        self.bodies.iter_mut().map(|(kind, body)| (*kind, body))
    }

    pub fn body(&self, kind: BodyKind) -> Option<&CelestialBody> {
        self.bodies().find(|(k, _)| *k == kind).map(|(_, body)| body)
    }

    pub fn node_of(&self, kind: BodyKind) -> Option<NodeId> {
        self.body(kind).map(CelestialBody::node)
    }

    /// Advance every body to `now`.
    pub fn tick(&mut self, now: Instant) {
        for (_, body) in &mut self.bodies {
            body.tick(&mut self.graph, now, &self.settings);
        }
    }

    /// Flip the animate flag on every body.
    pub fn toggle_animation(&mut self) {
        for (_, body) in &mut self.bodies {
            body.motion_mut().toggle_animate();
        }
        debug!(animating = self.is_animating(), "animation toggled");
    }

    pub fn set_fast_forward(&mut self, fast_forward: bool) {
        for (_, body) in &mut self.bodies {
            body.motion_mut().set_fast_forward(fast_forward);
        }
    }

    /// True when any body is animating.
    pub fn is_animating(&self) -> bool {
        self.bodies.iter().any(|(_, body)| body.motion().is_animating())
    }

    /// Per-body draw state in draw order. Bodies whose node is gone are skipped.
    pub fn frames(&self) -> Vec<(BodyKind, BodyFrame)> {
        self.bodies
            .iter()
            .filter_map(|(kind, body)| body.frame(&self.graph).map(|frame| (*kind, frame)))
            .collect()
    }
}
