//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. GPU resources and
//! the animated system are created on `resumed`; every `RedrawRequested`
//! applies pending input, advances the animation, uploads uniforms and draws
//! each body once.

use std::sync::Arc;
use std::time::Instant;

use orrery_config::{Config, RenderConfig};
use orrery_input::InputState;
use orrery_render::{
    BodyHandle, BodyUniform, DepthBuffer, FrameEncoder, FrameUniform, Lighting, ManagedTexture,
    PlanetRenderer, RenderContext, RenderPassBuilder, ShaderLibrary, SphericalCamera,
    SurfaceError, TextureManager, init_render_context_blocking,
};
use orrery_space::{BodyKind, SolarSystem};
use tracing::{debug, error, info, instrument, trace, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::assets::{body_textures, load_body_texture};
use crate::controls::{CommandOutcome, animation_settings, apply_command};
use crate::error::AppError;

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

pub fn clear_color(render: &RenderConfig) -> wgpu::Color {
    let [r, g, b] = render.clear_color;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

pub fn lighting(render: &RenderConfig) -> Lighting {
    Lighting {
        specular_color: render.specular_color,
        specular_exponent: render.specular_exponent,
        ambient_strength: render.ambient_strength,
    }
}

/// GPU-side resources that live as long as the window.
struct GpuScene {
    depth: DepthBuffer,
    renderer: PlanetRenderer,
    handles: Vec<(BodyKind, BodyHandle)>,
    // Keeps compiled modules and uploaded textures alive with the renderer.
    _shaders: ShaderLibrary,
    _textures: TextureManager,
}

impl GpuScene {
    fn handle(&self, kind: BodyKind) -> Option<BodyHandle> {
        self.handles
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, handle)| *handle)
    }
}

pub struct AppState {
    pub config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    scene: Option<GpuScene>,
    system: Option<SolarSystem>,
    camera: SphericalCamera,
    input: InputState,
    lighting: Lighting,
    clear_color: wgpu::Color,
    startup_error: Option<AppError>,
}

impl AppState {
    pub fn with_config(config: Config) -> Self {
        let camera = SphericalCamera::new(config.window.width, config.window.height);
        let lighting = lighting(&config.render);
        let clear_color = clear_color(&config.render);
        Self {
            config,
            window: None,
            gpu: None,
            scene: None,
            system: None,
            camera,
            input: InputState::new(),
            lighting,
            clear_color,
            startup_error: None,
        }
    }

    pub fn camera(&self) -> &SphericalCamera {
        &self.camera
    }

    pub fn system(&self) -> Option<&SolarSystem> {
        self.system.as_ref()
    }

    /// Bring up the GPU, load shader and textures, then build the system and upload its meshes.
    #[instrument(skip_all)]
    fn initialize(&mut self, window: Arc<Window>) -> Result<(), AppError> {
        let gpu = init_render_context_blocking(window, self.config.window.vsync)?;
        let (width, height) = gpu.size();
        let depth = DepthBuffer::new(&gpu.device, width, height);

        let mut shaders = ShaderLibrary::new();
        let shader =
            shaders.load_planet_shader(&gpu.device, self.config.render.shader_path.as_deref())?;

        let mut textures = TextureManager::new(&gpu.device);
        let mut renderer = PlanetRenderer::new(
            &gpu.device,
            &shader,
            gpu.surface_format,
            textures.bind_group_layout(),
        );

        let mut loaded: Vec<(BodyKind, Arc<ManagedTexture>)> = Vec::new();
        for kind in BodyKind::ALL {
            let texture =
                load_body_texture(&gpu.device, &gpu.queue, &mut textures, kind, &self.config.scene)?;
            loaded.push((kind, texture));
        }

        // Built after the uploads so the animation clock starts with the first frame.
        let mut system = SolarSystem::new(
            &body_textures(&self.config.scene),
            animation_settings(&self.config.animation),
            self.config.animation.start_animated,
            Instant::now(),
        )?;

        let mut handles = Vec::with_capacity(loaded.len());
        for (kind, body) in system.bodies_mut() {
            let Some((_, texture)) = loaded.iter().find(|(k, _)| *k == kind) else {
                continue;
            };
            let (positions, uv_triplets) = body.mesh_mut().buffers();
            let handle = renderer.add_body(
                &gpu.device,
                kind.name(),
                positions,
                uv_triplets,
                Arc::clone(texture),
            );
            handles.push((kind, handle));
        }

        self.camera.update_viewport(height, width);
        info!(width, height, bodies = handles.len(), "scene initialized");

        self.scene = Some(GpuScene {
            depth,
            renderer,
            handles,
            _shaders: shaders,
            _textures: textures,
        });
        self.system = Some(system);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.update_viewport(height, width);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            if let Some(scene) = &mut self.scene {
                scene.depth.resize(&gpu.device, width, height);
            }
        }
        debug!(width, height, "resized");
    }

    /// Apply every queued input command in order.
    fn process_commands(&mut self) -> CommandOutcome {
        for command in self.input.drain() {
            let Some(system) = self.system.as_mut() else {
                if command == orrery_input::ControlCommand::Quit {
                    return CommandOutcome::Quit;
                }
                continue;
            };
            if apply_command(command, &mut self.camera, system, &self.config.camera)
                == CommandOutcome::Quit
            {
                return CommandOutcome::Quit;
            }
        }
        CommandOutcome::Continue
    }

    fn render_frame(&mut self) -> Result<(), SurfaceError> {
        let (Some(gpu), Some(scene), Some(system)) = (&self.gpu, &self.scene, &mut self.system)
        else {
            return Ok(());
        };

        system.tick(Instant::now());

        let camera_state = self.camera.state();
        scene
            .renderer
            .update_frame(&gpu.queue, &FrameUniform::new(&camera_state, &self.lighting));
        for (kind, frame) in system.frames() {
            if let Some(handle) = scene.handle(kind) {
                let uniform = BodyUniform::new(frame.world, frame.local_spin, frame.lit);
                scene.renderer.update_body(&gpu.queue, handle, &uniform);
            }
        }

        let surface_texture = gpu.get_current_texture()?;
        let mut frame = FrameEncoder::new(&gpu.device, surface_texture);
        let builder = RenderPassBuilder::new()
            .clear_color(self.clear_color)
            .depth(scene.depth.view.clone(), DepthBuffer::CLEAR_VALUE)
            .label("orrery-main-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            scene.renderer.render(&mut pass);
        }
        frame.submit(&gpu.queue);

        trace!(
            theta = self.camera.theta(),
            phi = self.camera.phi(),
            radius = self.camera.radius(),
            "frame"
        );
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.initialize(Arc::clone(&window)) {
            error!("Startup failed: {e}");
            self.startup_error = Some(e);
            event_loop.exit();
            return;
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.on_key(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.on_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                if self.process_commands() == CommandOutcome::Quit {
                    info!("Quit requested, shutting down");
                    event_loop.exit();
                    return;
                }

                match self.render_frame() {
                    Ok(()) => {}
                    Err(SurfaceError::Lost) => {
                        if let Some(gpu) = &mut self.gpu {
                            let (w, h) = gpu.size();
                            gpu.resize(w, h);
                        }
                    }
                    Err(SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                        return;
                    }
                    Err(SurfaceError::Timeout) => {
                        warn!("Surface timeout, skipping frame");
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Create an event loop and run until the window closes.
///
/// A startup failure (GPU, shader, required texture) is returned after the loop exits.
#[instrument(skip(config))]
pub fn run_with_config(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::with_config(config);
    event_loop.run_app(&mut app)?;
    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
