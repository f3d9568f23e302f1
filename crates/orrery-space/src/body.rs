//! A textured sphere bound to a node of the scene graph.

use std::time::Instant;

use glam::Mat4;
use orrery_mesh::{MeshError, SphereMesh};
use orrery_scene::{NodeId, SceneGraph};
use tracing::warn;

use crate::motion::{AnimationSettings, BodyMotion};

/// Construction parameters for a [`CelestialBody`].
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    pub name: String,
    pub radius: f32,
    /// Texture file name, resolved by the caller.
    pub texture: String,
    /// Tilt about +Z in degrees, pushed into the node once.
    pub axial_tilt_degrees: f32,
    pub seconds_per_rotation: f32,
    pub seconds_per_orbit: f32,
    /// Whether the body receives Phong lighting from the sun.
    pub lit: bool,
}

/// What the renderer needs to draw a body this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyFrame {
    pub world: Mat4,
    pub local_spin: Mat4,
    pub lit: bool,
}

/// A sphere that spins about its own axis and orbits with its scene node.
///
/// The body does not own its node. It holds the [`NodeId`] and looks it up
/// in the graph each time, so a removed node simply stops the body from
/// moving or drawing.
#[derive(Debug)]
pub struct CelestialBody {
    name: String,
    texture: String,
    mesh: SphereMesh,
    node: NodeId,
    motion: BodyMotion,
    lit: bool,
}

impl CelestialBody {
    /// Build the mesh and bake the axial tilt into `node`.
    pub fn new(
        descriptor: BodyDescriptor,
        node: NodeId,
        graph: &mut SceneGraph,
        now: Instant,
    ) -> Result<Self, MeshError> {
        let mesh = SphereMesh::new(descriptor.radius)?;
        let tilt = Mat4::from_rotation_z(descriptor.axial_tilt_degrees.to_radians());
        if !graph.accumulate_rotation(node, tilt) {
            warn!(body = %descriptor.name, "scene node missing, tilt not applied");
        }

        Ok(Self {
            name: descriptor.name,
            texture: descriptor.texture,
            mesh,
            node,
            motion: BodyMotion::new(
                descriptor.seconds_per_rotation,
                descriptor.seconds_per_orbit,
                now,
            ),
            lit: descriptor.lit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut SphereMesh {
        &mut self.mesh
    }

    pub fn motion(&self) -> &BodyMotion {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut BodyMotion {
        &mut self.motion
    }

    /// Advance the spin and push this tick's orbit increment into the node.
    pub fn tick(&mut self, graph: &mut SceneGraph, now: Instant, settings: &AnimationSettings) {
        let Some(step) = self.motion.advance(now, settings) else {
            return;
        };
        if step.orbit_delta != 0.0 && !graph.accumulate_rotation(self.node, step.orbit_matrix()) {
            warn!(body = %self.name, "scene node missing, orbit skipped");
        }
    }

    /// World matrix and spin for this frame, or `None` if the node is gone.
    pub fn frame(&self, graph: &SceneGraph) -> Option<BodyFrame> {
        Some(BodyFrame {
            world: graph.compose_to_world(self.node)?,
            local_spin: self.motion.local_spin_matrix(),
            lit: self.lit,
        })
    }
}
