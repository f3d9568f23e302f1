//! GPU pipeline for textured, optionally Phong-lit celestial bodies.
//!
//! Bind groups:
//! - group 0: [`FrameUniform`] (view, projection, camera position, lighting constants)
//! - group 1: [`BodyUniform`] (world matrix, local spin, lit flag), one per body
//! - group 2: body texture + sampler, from [`crate::TextureManager`]
//!
//! Each body owns two non-indexed vertex buffers: positions at location 0 and
//! `(phi, theta, radius)` UV triplets at location 1.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::CameraState;
use crate::depth::DepthBuffer;
use crate::texture::ManagedTexture;

/// Per-frame uniform shared by every body.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub specular_exponent: f32,
    pub specular_color: [f32; 3],
    pub ambient_strength: f32,
}

/// Lighting constants that stay fixed across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub specular_color: [f32; 3],
    pub specular_exponent: f32,
    pub ambient_strength: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            specular_color: [1.0, 1.0, 1.0],
            specular_exponent: 65.0,
            ambient_strength: 0.15,
        }
    }
}

impl FrameUniform {
    pub fn new(camera: &CameraState, lighting: &Lighting) -> Self {
        Self {
            view: camera.view.to_cols_array_2d(),
            projection: camera.projection.to_cols_array_2d(),
            camera_position: camera.position.to_array(),
            specular_exponent: lighting.specular_exponent,
            specular_color: lighting.specular_color,
            ambient_strength: lighting.ambient_strength,
        }
    }
}

/// Per-body uniform.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BodyUniform {
    pub world: [[f32; 4]; 4],
    pub local_spin: [[f32; 4]; 4],
    pub lit: u32,
    pub _pad: [u32; 3],
}

impl BodyUniform {
    pub fn new(world: Mat4, local_spin: Mat4, lit: bool) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            local_spin: local_spin.to_cols_array_2d(),
            lit: u32::from(lit),
            _pad: [0; 3],
        }
    }
}

impl Default for BodyUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, false)
    }
}

fn vec3_buffer_layout(location: u32) -> wgpu::VertexBufferLayout<'static> {
    let attributes: &'static [wgpu::VertexAttribute] = match location {
        0 => &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
        _ => &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    };
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

fn uniform_layout_entry(size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: std::num::NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

pub struct PlanetPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub body_bind_group_layout: wgpu::BindGroupLayout,
}

impl PlanetPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("planet-frame-bgl"),
                entries: &[uniform_layout_entry(std::mem::size_of::<FrameUniform>())],
            });
        let body_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("planet-body-bgl"),
                entries: &[uniform_layout_entry(std::mem::size_of::<BodyUniform>())],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("planet-pipeline-layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &body_bind_group_layout,
                texture_layout,
            ],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("planet-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vec3_buffer_layout(0), vec3_buffer_layout(1)],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // The star sphere is seen from inside, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_bind_group_layout,
            body_bind_group_layout,
        }
    }
}

/// Index of a body registered with [`PlanetRenderer::add_body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

struct BodyResources {
    position_buffer: wgpu::Buffer,
    uv_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Arc<ManagedTexture>,
}

/// Owns GPU resources for every body and draws them in registration order.
pub struct PlanetRenderer {
    pipeline: PlanetPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    bodies: Vec<BodyResources>,
}

impl PlanetRenderer {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline = PlanetPipeline::new(device, shader, surface_format, texture_layout);

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("planet-frame-uniform"),
            contents: bytemuck::cast_slice(&[FrameUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planet-frame-bg"),
            layout: &pipeline.frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            bodies: Vec::new(),
        }
    }

    /// Upload a body's vertex streams. `positions` and `uv_triplets` must be the same length.
    pub fn add_body(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        positions: &[[f32; 3]],
        uv_triplets: &[[f32; 3]],
        texture: Arc<ManagedTexture>,
    ) -> BodyHandle {
        debug_assert_eq!(positions.len(), uv_triplets.len());

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-positions")),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uv_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-uvs")),
            contents: bytemuck::cast_slice(uv_triplets),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-uniform")),
            contents: bytemuck::cast_slice(&[BodyUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-bg")),
            layout: &self.pipeline.body_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex_count = positions.len().min(uv_triplets.len()) as u32;
        log::debug!("Registered body '{label}' with {vertex_count} vertices");

        self.bodies.push(BodyResources {
            position_buffer,
            uv_buffer,
            vertex_count,
            uniform_buffer,
            bind_group,
            texture,
        });
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn update_frame(&self, queue: &wgpu::Queue, frame: &FrameUniform) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[*frame]));
    }

    /// Returns `false` for an unknown handle.
    pub fn update_body(&self, queue: &wgpu::Queue, handle: BodyHandle, body: &BodyUniform) -> bool {
        let Some(resources) = self.bodies.get(handle.0) else {
            return false;
        };
        queue.write_buffer(&resources.uniform_buffer, 0, bytemuck::cast_slice(&[*body]));
        true
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for body in &self.bodies {
            render_pass.set_bind_group(1, &body.bind_group, &[]);
            render_pass.set_bind_group(2, &body.texture.bind_group, &[]);
            render_pass.set_vertex_buffer(0, body.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, body.uv_buffer.slice(..));
            render_pass.draw(0..body.vertex_count, 0..1);
        }
    }
}
