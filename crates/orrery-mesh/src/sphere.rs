//! Latitude/longitude sphere with seam-corrected spherical texture coordinates.
//!
//! Alongside each Cartesian position the mesh emits a parallel `[φ, θ, r]`
//! triplet in degrees. The fragment shader turns it into `(θ / 360, φ / 180)`.
//! Triangles touching the last longitude column carry θ = 360 on their
//! trailing edge instead of wrapping back to 0, so no triangle interpolates
//! across the whole texture.

use glam::Vec3;
use orrery_math::SphericalCoord;

use crate::error::MeshError;

/// Angular step between neighbouring rings and columns.
pub const DEFAULT_SLICE_DEGREES: f32 = 10.0;

/// A UV-sphere whose vertex data is generated lazily and cached.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    radius: f32,
    slice_degrees: f32,
    positions: Vec<[f32; 3]>,
    uv_triplets: Vec<[f32; 3]>,
    dirty: bool,
    builds: u32,
}

impl SphereMesh {
    /// Sphere of `radius` at the default 10° step.
    pub fn new(radius: f32) -> Result<Self, MeshError> {
        Self::with_slice(radius, DEFAULT_SLICE_DEGREES)
    }

    pub fn with_slice(radius: f32, slice_degrees: f32) -> Result<Self, MeshError> {
        validate_radius(radius)?;
        if !slice_degrees.is_finite() || slice_degrees <= 0.0 || slice_degrees > 90.0 {
            return Err(MeshError::InvalidSlice(slice_degrees));
        }
        let bands = 180.0 / slice_degrees;
        if (bands - bands.round()).abs() > 1e-4 {
            return Err(MeshError::InvalidSlice(slice_degrees));
        }

        let mut mesh = Self {
            radius,
            slice_degrees,
            positions: Vec::new(),
            uv_triplets: Vec::new(),
            dirty: true,
            builds: 0,
        };
        mesh.rebuild_if_dirty();
        Ok(mesh)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn slice_degrees(&self) -> f32 {
        self.slice_degrees
    }

    /// Interior latitude rings, poles excluded.
    pub fn ring_count(&self) -> usize {
        (180.0 / self.slice_degrees).round() as usize - 1
    }

    /// Longitude columns per ring.
    pub fn column_count(&self) -> usize {
        (360.0 / self.slice_degrees).round() as usize
    }

    /// `(rings - 1) * columns * 2` band triangles plus one fan per pole.
    pub fn triangle_count(&self) -> usize {
        let columns = self.column_count();
        (self.ring_count() - 1) * columns * 2 + 2 * columns
    }

    pub fn vertex_count(&self) -> usize {
        self.triangle_count() * 3
    }

    /// How many times the vertex data has been generated.
    pub fn build_count(&self) -> u32 {
        self.builds
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Change the radius. Geometry is regenerated on next access.
    pub fn set_radius(&mut self, radius: f32) -> Result<(), MeshError> {
        validate_radius(radius)?;
        if radius != self.radius {
            self.radius = radius;
            self.dirty = true;
        }
        Ok(())
    }

    /// Force regeneration on next access.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Vertex positions and their parallel `[φ, θ, r]` triplets.
    pub fn buffers(&mut self) -> (&[[f32; 3]], &[[f32; 3]]) {
        self.rebuild_if_dirty();
        (&self.positions, &self.uv_triplets)
    }

    pub fn positions(&mut self) -> &[[f32; 3]] {
        self.buffers().0
    }

    pub fn uv_triplets(&mut self) -> &[[f32; 3]] {
        self.buffers().1
    }

    fn rebuild_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        let capacity = self.vertex_count();
        self.positions.clear();
        self.uv_triplets.clear();
        self.positions.reserve(capacity);
        self.uv_triplets.reserve(capacity);
        self.generate();
        self.dirty = false;
        self.builds += 1;
    }

    fn generate(&mut self) {
        let step = self.slice_degrees;
        let r = self.radius;
        let rings = self.ring_count();
        let columns = self.column_count();

        let phi = |ring: usize| (ring + 1) as f32 * step;
        let theta = |column: usize| column as f32 * step;
        // θ of the column after `column`; reaches 360 on the last column.
        let next_theta = |column: usize| (column + 1) as f32 * step;

        let grid: Vec<Vec3> = (0..rings)
            .flat_map(|ring| {
                (0..columns)
                    .map(move |column| SphericalCoord::new(theta(column), phi(ring), r).to_cartesian())
            })
            .collect();
        let at = |ring: usize, column: usize| grid[ring * columns + column];

        let top = Vec3::new(0.0, r, 0.0);
        let bottom = Vec3::new(0.0, -r, 0.0);

        for c in 0..columns {
            let next = (c + 1) % columns;
            self.push(at(0, c), [phi(0), theta(c), r]);
            self.push(top, [0.0, next_theta(c), r]);
            self.push(at(0, next), [phi(0), next_theta(c), r]);
        }

        for ring in 0..rings - 1 {
            let below = ring + 1;
            for c in 0..columns {
                let next = (c + 1) % columns;

                self.push(at(ring, c), [phi(ring), theta(c), r]);
                self.push(at(below, next), [phi(below), next_theta(c), r]);
                self.push(at(below, c), [phi(below), theta(c), r]);

                self.push(at(ring, c), [phi(ring), theta(c), r]);
                self.push(at(ring, next), [phi(ring), next_theta(c), r]);
                self.push(at(below, next), [phi(below), next_theta(c), r]);
            }
        }

        let last = rings - 1;
        for c in 0..columns {
            let next = (c + 1) % columns;
            self.push(at(last, c), [phi(last), theta(c), r]);
            self.push(at(last, next), [phi(last), next_theta(c), r]);
            self.push(bottom, [180.0, next_theta(c), r]);
        }
    }

    fn push(&mut self, position: Vec3, uv: [f32; 3]) {
        self.positions.push(position.to_array());
        self.uv_triplets.push(uv);
    }
}

fn validate_radius(radius: f32) -> Result<(), MeshError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(MeshError::InvalidRadius(radius))
    }
}
