//! Procedural UV-sphere geometry for celestial bodies.

mod error;
mod sphere;

pub use error::MeshError;
pub use sphere::{DEFAULT_SLICE_DEGREES, SphereMesh};
