//! Startup failures that abort the application.

use orrery_space::BodyKind;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] orrery_render::RenderContextError),

    #[error("failed to load shader: {0}")]
    Shader(#[from] orrery_render::ShaderError),

    #[error("failed to build body mesh: {0}")]
    Mesh(#[from] orrery_mesh::MeshError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("texture for {} could not be loaded: {source}", .body.name())]
    Texture {
        body: BodyKind,
        #[source]
        source: orrery_render::TextureError,
    },
}
