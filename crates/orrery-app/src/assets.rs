//! Body texture loading with procedural stand-ins for missing files.

use std::sync::Arc;

use orrery_config::SceneConfig;
use orrery_render::{ManagedTexture, TextureManager};
use orrery_space::{BodyKind, BodyTextures, ProceduralTexture, StarfieldGenerator, banded_texture};
use tracing::{info, warn};

use crate::error::AppError;

/// Size of generated body textures (2:1 equirectangular).
pub const FALLBACK_BODY_SIZE: (u32, u32) = (512, 256);
/// Size of the generated star sphere texture.
pub const FALLBACK_STARS_SIZE: (u32, u32) = (4096, 2048);

/// Texture file names from the scene config.
pub fn body_textures(scene: &SceneConfig) -> BodyTextures {
    BodyTextures {
        sun: scene.sun_texture.clone(),
        earth: scene.earth_texture.clone(),
        moon: scene.moon_texture.clone(),
        stars: scene.stars_texture.clone(),
    }
}

/// In-memory replacement for a body's texture.
pub fn fallback_texture(kind: BodyKind, scene: &SceneConfig) -> ProceduralTexture {
    let (w, h) = FALLBACK_BODY_SIZE;
    match kind {
        BodyKind::Sun => banded_texture(w, h, [255, 196, 64]),
        BodyKind::Earth => banded_texture(w, h, [48, 96, 200]),
        BodyKind::Moon => banded_texture(w, h, [168, 168, 160]),
        BodyKind::Stars => {
            let (w, h) = FALLBACK_STARS_SIZE;
            StarfieldGenerator::new(scene.star_seed, scene.star_count).render(w, h)
        }
    }
}

/// Load the texture for `kind` from `scene.texture_dir`.
///
/// A missing or undecodable file is fatal when `require_textures` is set;
/// otherwise it is logged and replaced by [`fallback_texture`].
pub fn load_body_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    manager: &mut TextureManager,
    kind: BodyKind,
    scene: &SceneConfig,
) -> Result<Arc<ManagedTexture>, AppError> {
    let path = scene.texture_path(body_textures(scene).get(kind));
    match manager.load_from_file(device, queue, &path) {
        Ok(texture) => {
            info!(body = kind.name(), path = %path.display(), "texture loaded");
            Ok(texture)
        }
        Err(source) if scene.require_textures => Err(AppError::Texture { body: kind, source }),
        Err(err) => {
            warn!(body = kind.name(), path = %path.display(), %err, "using generated texture");
            let generated = fallback_texture(kind, scene);
            manager
                .create_texture(
                    device,
                    queue,
                    &format!("generated-{}", kind.name()),
                    &generated.rgba,
                    generated.width,
                    generated.height,
                )
                .map_err(|source| AppError::Texture { body: kind, source })
        }
    }
}
