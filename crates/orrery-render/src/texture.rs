//! GPU textures for the body shader: upload, mip generation, file loading and caching.
//!
//! [`TextureManager::load_from_file`] decodes PNG/JPEG with `image`, uploads
//! sRGB RGBA8 with a full mip chain and returns an [`Arc<ManagedTexture>`]
//! with a bind group ready for group 2 of the planet pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Format for every body texture.
pub const BODY_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub struct ManagedTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
    pub mip_level_count: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture data size ({actual}) does not match expected ({expected}) for {width}x{height}")]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("failed to read texture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode an encoded PNG or JPEG into RGBA8.
pub fn decode_rgba8(bytes: &[u8]) -> Result<DecodedImage, TextureError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    validate_dimensions(width, height)?;
    Ok(DecodedImage {
        width,
        height,
        rgba: image.into_raw(),
    })
}

/// Mip levels for a full chain down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

const BLIT_SHADER_SOURCE: &str = r#"
@group(0) @binding(0) var src_texture: texture_2d<f32>;
@group(0) @binding(1) var src_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) idx: u32) -> VertexOutput {
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    var out: VertexOutput;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(src_texture, src_sampler, in.uv);
}
"#;

/// Owns the shared sampler, the group-2 bind group layout and a cache keyed by name.
pub struct TextureManager {
    textures: HashMap<String, Arc<ManagedTexture>>,
    sampler: wgpu::Sampler,
    bind_group_layout: wgpu::BindGroupLayout,
    blit_bind_group_layout: wgpu::BindGroupLayout,
    blit_pipeline: wgpu::RenderPipeline,
}

fn texture_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

impl TextureManager {
    pub fn new(device: &wgpu::Device) -> Self {
        // Clamp so u = 1.0 on the seam column samples the right edge, not the left.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("body-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = texture_bind_group_layout(device, "body-texture-bgl");
        let blit_bind_group_layout = texture_bind_group_layout(device, "mip-blit-bgl");

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mip-blit-shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER_SOURCE.into()),
        });
        let blit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mip-blit-layout"),
            bind_group_layouts: &[&blit_bind_group_layout],
            immediate_size: 0,
        });
        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mip-blit-pipeline"),
            layout: Some(&blit_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: BODY_TEXTURE_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            textures: HashMap::new(),
            sampler,
            bind_group_layout,
            blit_bind_group_layout,
            blit_pipeline,
        }
    }

    /// Layout of the texture + sampler bind group.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn get(&self, name: &str) -> Option<Arc<ManagedTexture>> {
        self.textures.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Load, decode and upload an image file. Cached by path.
    pub fn load_from_file(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Arc<ManagedTexture>, TextureError> {
        let name = path.to_string_lossy();
        if let Some(existing) = self.textures.get(name.as_ref()) {
            return Ok(Arc::clone(existing));
        }
        let bytes = std::fs::read(path).map_err(|source| TextureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let image = decode_rgba8(&bytes)?;
        self.create_texture(device, queue, &name, &image.rgba, image.width, image.height)
    }

    /// Upload RGBA8 sRGB pixels and generate mips. Cached by `name`.
    pub fn create_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Arc<ManagedTexture>, TextureError> {
        if let Some(existing) = self.textures.get(name) {
            return Ok(Arc::clone(existing));
        }
        validate_dimensions(width, height)?;
        validate_data_size(rgba, width, height)?;

        let mip_levels = mip_level_count(width, height);
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size,
            mip_level_count: mip_levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BODY_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: None,
            },
            size,
        );

        if mip_levels > 1 {
            self.generate_mipmaps(device, queue, &texture, mip_levels);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{name}-bind-group")),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let managed = Arc::new(ManagedTexture {
            texture,
            view,
            bind_group,
            width,
            height,
            mip_level_count: mip_levels,
        });
        self.textures.insert(name.to_string(), Arc::clone(&managed));
        log::info!("Created texture '{name}' ({width}x{height}, {mip_levels} mips)");
        Ok(managed)
    }

    fn generate_mipmaps(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &wgpu::Texture,
        mip_count: u32,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("mip-encoder"),
        });

        for level in 1..mip_count {
            let src_view = texture.create_view(&wgpu::TextureViewDescriptor {
                base_mip_level: level - 1,
                mip_level_count: Some(1),
                ..Default::default()
            });
            let dst_view = texture.create_view(&wgpu::TextureViewDescriptor {
                base_mip_level: level,
                mip_level_count: Some(1),
                ..Default::default()
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("mip-blit-bind-group"),
                layout: &self.blit_bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&src_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mip-blit-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &dst_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(&self.blit_pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    Ok(())
}

fn validate_data_size(data: &[u8], width: u32, height: u32) -> Result<(), TextureError> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(TextureError::DataSizeMismatch {
            actual: data.len(),
            expected,
            width,
            height,
        });
    }
    Ok(())
}

/// Headless device for tests; `None` when the machine has no adapter.
#[cfg(test)]
pub(crate) fn create_test_device_queue() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;
        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([x as u8 * 10, y as u8 * 10, 0, 255])
        });
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(256, 128), 9);
        assert_eq!(mip_level_count(2048, 1024), 12);
        assert_eq!(mip_level_count(1000, 500), 10);
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode_rgba8(&encode_png(4, 2)).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.rgba.len(), 4 * 2 * 4);
        // Pixel (1, 1)
        assert_eq!(&decoded.rgba[(4 + 1) * 4..(4 + 1) * 4 + 4], &[10, 10, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_rgba8(b"definitely not an image"),
            Err(TextureError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let mut manager = TextureManager::new(&device);
        let dir = tempfile::tempdir().unwrap();
        let result = manager.load_from_file(&device, &queue, &dir.path().join("nope.jpg"));
        assert!(matches!(result, Err(TextureError::Read { .. })));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            validate_dimensions(0, 4),
            Err(TextureError::ZeroDimensions { .. })
        ));
        assert!(matches!(
            validate_data_size(&[0; 10], 2, 2),
            Err(TextureError::DataSizeMismatch { expected: 16, .. })
        ));
        assert!(validate_data_size(&[0; 16], 2, 2).is_ok());
    }

    #[test]
    fn test_load_and_cache_png() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moon.png");
        std::fs::write(&path, encode_png(8, 4)).unwrap();

        let mut manager = TextureManager::new(&device);
        let first = manager.load_from_file(&device, &queue, &path).unwrap();
        assert_eq!((first.width, first.height), (8, 4));
        assert_eq!(first.mip_level_count, 4);

        let second = manager.load_from_file(&device, &queue, &path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_create_texture_rejects_bad_data() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let mut manager = TextureManager::new(&device);
        let result = manager.create_texture(&device, &queue, "bad", &[0; 3], 1, 1);
        assert!(matches!(result, Err(TextureError::DataSizeMismatch { .. })));
    }
}
