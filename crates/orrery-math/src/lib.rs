//! Spherical coordinates and angle helpers shared by the orbit camera and the sphere mesh builder.

mod angle;
mod spherical;

pub use angle::{wrap_degrees, wrap_degrees_once};
pub use spherical::{SNAP_EPSILON, SphericalCoord, snap_to_zero};
