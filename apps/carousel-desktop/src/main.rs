use anyhow::{Context, Result};
use carousel_assets::ModelLibrary;
use carousel_common::MeshId;
use carousel_geometry::{build_ground, build_poles, build_roof};
use carousel_input::{Action, Bindings, Key, KeyPhase};
use carousel_render::{LookAtCamera, MonoViewpoint, Renderer, build_frame};
use carousel_render_wgpu::{GpuTarget, WgpuRenderer};
use carousel_scene::{Carousel, SceneConfig, SpinDirection};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "carousel-desktop", about = "Spinning merry-go-round demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the rider models (overrides the config)
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value = "512")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "512")]
    height: u32,

    /// Start with the status overlay hidden
    #[arg(long)]
    no_overlay: bool,
}

fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Space => Key::Space,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyS => Key::S,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

fn key_phase(state: ElementState, repeat: bool) -> KeyPhase {
    match (state, repeat) {
        (ElementState::Released, _) => KeyPhase::Release,
        (ElementState::Pressed, true) => KeyPhase::Repeat,
        (ElementState::Pressed, false) => KeyPhase::Press,
    }
}

/// Application state.
struct AppState {
    carousel: Carousel,
    bindings: Bindings,
    viewpoint: MonoViewpoint,
    models: ModelLibrary,
    started: Instant,
    show_overlay: bool,
    quit_requested: bool,
}

impl AppState {
    fn new(config: SceneConfig, models: ModelLibrary, show_overlay: bool) -> Self {
        let viewpoint = MonoViewpoint::new(LookAtCamera::from_config(&config.camera));
        Self {
            carousel: Carousel::new(config),
            bindings: Bindings::new(),
            viewpoint,
            models,
            started: Instant::now(),
            show_overlay,
            quit_requested: false,
        }
    }

    fn update(&mut self) {
        let t = self.started.elapsed().as_secs_f64();
        self.carousel.update(t);
    }

    fn handle_key(&mut self, code: KeyCode, phase: KeyPhase) {
        if code == KeyCode::F1 && phase == KeyPhase::Release {
            self.show_overlay = !self.show_overlay;
            return;
        }
        match self.bindings.action_for(key_from_code(code), phase) {
            Some(Action::Quit) => self.quit_requested = true,
            Some(action) => {
                self.carousel.apply(action);
            }
            None => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        let state = self.carousel.state();
        let spin = state.spin();

        egui::Window::new("Carousel")
            .default_pos([8.0, 8.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Angle: {:.1}°", spin.angle));
                let direction = match spin.direction {
                    SpinDirection::Clockwise => "clockwise",
                    SpinDirection::CounterClockwise => "counterclockwise",
                };
                ui.label(format!("Direction: {direction}"));
                ui.label(format!(
                    "Rotation: {}",
                    if state.rotation_enabled { "on" } else { "off" }
                ));
                ui.label(format!(
                    "Up/down: {}",
                    if state.bob_enabled { "on" } else { "off" }
                ));
                ui.separator();

                for (i, rider) in self.carousel.riders().iter().enumerate() {
                    let note = if self.models.is_placeholder(rider.animal) {
                        " (placeholder)"
                    } else {
                        ""
                    };
                    ui.label(format!(
                        "{}: {:.2}{note}",
                        rider.animal,
                        state.offset(i)
                    ));
                }
                ui.separator();

                for line in self.bindings.help_text().lines() {
                    ui.small(line);
                }
                ui.small("F1 - Toggle this panel");
            });
    }
}

/// Everything that exists only once a window and device are up.
struct GpuState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    initial_size: PhysicalSize<u32>,
    gpu: Option<GpuState>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState, width: u32, height: u32) -> Self {
        Self {
            state,
            initial_size: PhysicalSize::new(width, height),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<GpuState> {
        let attrs = Window::default_attributes()
            .with_title("Merry-go-round")
            .with_inner_size(self.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("carousel_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        renderer.upload_mesh(&device, MeshId::Roof, &build_roof());
        renderer.upload_mesh(&device, MeshId::Ground, &build_ground());
        renderer.upload_mesh(&device, MeshId::Poles, &build_poles());
        for (animal, mesh) in self.state.models.iter() {
            renderer.upload_mesh(&device, MeshId::Animal(animal), mesh);
        }

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(GpuState {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self) {
        self.state.update();

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frames = build_frame(
            &self.state.viewpoint,
            gpu.config.width,
            gpu.config.height,
            &self.state.carousel,
        );
        let draws = GpuTarget {
            renderer: &gpu.renderer,
            device: &gpu.device,
            queue: &gpu.queue,
            view: &view,
        }
        .render(&frames);
        tracing::trace!(draws, "frame drawn");

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let state = &mut self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("failed to start renderer: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(code, key_phase(key_state, repeat));
                if self.state.quit_requested {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("carousel-desktop starting");

    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(dir) = cli.models_dir {
        config.models_dir = dir;
    }

    let models = ModelLibrary::load(&config);
    let state = AppState::new(config, models, !cli.no_overlay);
    println!("{}", state.bindings.help_text());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
