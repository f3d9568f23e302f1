//! Depth buffer sized to the window surface.
//!
//! Standard Z: the near plane maps to 0.0 and the far plane to 1.0, so the
//! buffer clears to 1.0 and nearer fragments win with `Less`.

pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Far plane.
    pub const CLEAR_VALUE: f32 = 1.0;

    pub const COMPARE_FUNCTION: wgpu::CompareFunction = wgpu::CompareFunction::Less;

    /// Create a depth buffer. Zero dimensions are clamped to 1.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("orrery-depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Recreate at the new size; no-op when the size is unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.width == width.max(1) && self.height == height.max(1) {
            return;
        }
        *self = Self::new(device, width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth state for pipelines drawing into this buffer.
    pub fn stencil_state() -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Self::FORMAT,
            depth_write_enabled: true,
            depth_compare: Self::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::create_test_device_queue;

    #[test]
    fn test_standard_z_constants() {
        assert_eq!(DepthBuffer::FORMAT, wgpu::TextureFormat::Depth32Float);
        assert_eq!(DepthBuffer::CLEAR_VALUE, 1.0);
        assert_eq!(DepthBuffer::COMPARE_FUNCTION, wgpu::CompareFunction::Less);
    }

    #[test]
    fn test_stencil_state_matches_constants() {
        let state = DepthBuffer::stencil_state();
        assert_eq!(state.format, DepthBuffer::FORMAT);
        assert_eq!(state.depth_compare, DepthBuffer::COMPARE_FUNCTION);
        assert!(state.depth_write_enabled);
    }

    #[test]
    fn test_resize_updates_dimensions() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let mut depth = DepthBuffer::new(&device, 800, 600);
        depth.resize(&device, 1024, 768);
        assert_eq!((depth.width(), depth.height()), (1024, 768));
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let depth = DepthBuffer::new(&device, 0, 0);
        assert_eq!((depth.width(), depth.height()), (1, 1));
    }
}
