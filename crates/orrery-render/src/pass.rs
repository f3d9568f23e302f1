//! Per-frame command encoding and render pass setup.

/// Background behind the star sphere when the camera leaves it.
pub const SPACE_GREY: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Fluent configuration for the main colour + depth pass.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth: Option<(wgpu::TextureView, f32)>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    pub fn new() -> Self {
        Self {
            clear_color: SPACE_GREY,
            depth: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth view cleared to `clear_value` each frame.
    pub fn depth(mut self, view: wgpu::TextureView, clear_value: f32) -> Self {
        self.depth = Some((view, clear_value));
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn begin<'encoder>(
        &'encoder self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth
                .as_ref()
                .map(|(view, clear)| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(*clear),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame's encoder plus the swapchain image it draws into.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("orrery-frame"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            surface_texture,
            surface_view,
        }
    }

    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &'a RenderPassBuilder,
    ) -> wgpu::RenderPass<'a> {
        builder.begin(&mut self.encoder, &self.surface_view)
    }

    /// Submit the recorded commands and present the frame.
    pub fn submit(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        self.surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clear_is_space_grey() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color, SPACE_GREY);
        assert!(builder.depth.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let color = wgpu::Color {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        };
        let builder = RenderPassBuilder::new().clear_color(color).label("main");
        assert_eq!(builder.clear_color, color);
        assert_eq!(builder.label, Some("main"));
    }
}
