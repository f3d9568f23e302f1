//! The animated sun/earth/moon system: bodies, their motion, and scene setup.

pub mod body;
pub mod motion;
pub mod procedural;
pub mod system;

pub use body::{BodyDescriptor, BodyFrame, CelestialBody};
pub use motion::{AnimationSettings, BodyMotion, FAST_FORWARD_MULTIPLIER, MotionStep, TIME_SCALE};
pub use procedural::{ProceduralTexture, StarfieldGenerator, banded_texture, blackbody_to_rgb};
pub use system::{BodyKind, BodyTextures, STAR_SPHERE_RADIUS, SceneLayout, SolarSystem, log_scale};
