//! wgpu rendering for the orrery: surface management, depth, the spherical camera,
//! shader and texture loading, and the textured body pipeline.

pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod planet_pipeline;
pub mod shader;
pub mod texture;

pub use camera::{
    CameraState, FOV_Y_DEGREES, POLAR_MAX, POLAR_MIN, SphericalCamera, ZOOM_MAX, ZOOM_MIN,
    Z_FAR, Z_NEAR,
};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_GREY};
pub use planet_pipeline::{
    BodyHandle, BodyUniform, FrameUniform, Lighting, PlanetPipeline, PlanetRenderer,
};
pub use shader::{PLANET_SHADER_NAME, PLANET_SHADER_SOURCE, ShaderError, ShaderLibrary};
pub use texture::{
    BODY_TEXTURE_FORMAT, DecodedImage, ManagedTexture, TextureError, TextureManager,
    decode_rgba8, mip_level_count,
};
