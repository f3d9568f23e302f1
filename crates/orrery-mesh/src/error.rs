/// Errors raised when a sphere mesh is configured with unusable parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Radius must be finite and strictly positive.
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f32),

    /// The angular step must divide 180° evenly and leave at least one interior ring.
    #[error("angular step {0}° does not divide 180° into at least two bands")]
    InvalidSlice(f32),
}
