use std::time::Instant;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use cluster_core::constants::{CLEAR_COLOR, DEFAULT_SEED};
use cluster_core::render::ParticleRenderer;
use cluster_core::{
    normalize_pointer, normalize_scroll, pack_instances, Camera, FieldError, FieldPreset,
    InputCells, ParticleInstance, Visualization,
};
use glam::Vec2;

// Pixels scrolled per wheel "line", roughly what browsers use.
const WHEEL_LINE_PX: f64 = 40.0;
const STATS_INTERVAL_SEC: f32 = 5.0;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: ParticleRenderer,
    camera: Camera,
    instances: Vec<ParticleInstance>,
}

impl<'w> GpuState<'w> {
    async fn new(
        window: &'w winit::window::Window,
        camera: Camera,
        capacity: usize,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = ParticleRenderer::new(&device, format, capacity);
        let mut camera = camera;
        camera.set_viewport(config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            camera,
            instances: Vec::with_capacity(capacity),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.camera.set_viewport(new_size.width, new_size.height);
    }

    fn render(&mut self, vis: &Visualization) -> Result<(), wgpu::SurfaceError> {
        pack_instances(vis, &mut self.instances);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.renderer.draw(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            self.camera.view_proj(),
            &self.instances,
            wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        );
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// `cluster-native [preset] [seed]`
fn parse_args() -> anyhow::Result<(FieldPreset, u64)> {
    let mut args = std::env::args().skip(1);
    let preset = match args.next() {
        Some(p) => p.parse::<FieldPreset>()?,
        None => FieldPreset::InteractiveCluster,
    };
    let seed = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("invalid seed '{}': {}", s, e))?,
        None => DEFAULT_SEED,
    };
    Ok((preset, seed))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let (preset, seed) = parse_args()?;
    let config = preset.scene_config();
    let mut vis = Visualization::mount(&config, seed)?;
    log::info!(
        "[{}] {} particles, seed {}",
        preset,
        vis.field().len(),
        seed
    );

    // Event handlers publish here; the redraw path reads once per frame.
    let inputs = InputCells::new();
    let mut wheel_scroll = 0.0_f64;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("Particle field ({})", preset))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(
        &window,
        config.camera.clone(),
        vis.field().len(),
    ))?;
    let mut last_frame = Instant::now();
    let mut stats_elapsed = 0.0_f32;
    let mut stats_frames = 0_u32;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let size = state.window.inner_size();
                inputs.pointer.publish(normalize_pointer(
                    Vec2::new(position.x as f32, position.y as f32),
                    Vec2::new(size.width as f32, size.height as f32),
                ));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64 * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => p.y,
                };
                // Wheel down scrolls the page down, i.e. increases the offset.
                wheel_scroll = normalize_scroll(wheel_scroll - dy) as f64;
                inputs.scroll.publish(wheel_scroll as f32);
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt_sec = (now - last_frame).as_secs_f32();
            last_frame = now;

            match vis.step(inputs.snapshot()) {
                Ok(()) => {}
                Err(FieldError::InvalidInput(msg)) => log::warn!("skipped frame: {}", msg),
                Err(e) => log::error!("step error: {}", e),
            }
            match state.render(&vis) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::error!("render error: {:?}", e),
            }

            stats_frames += 1;
            stats_elapsed += dt_sec;
            if stats_elapsed >= STATS_INTERVAL_SEC {
                log::debug!(
                    "[frame] {:.1} fps, rotation=({:.3},{:.3})",
                    stats_frames as f32 / stats_elapsed,
                    vis.rotation().x,
                    vis.rotation().y
                );
                stats_elapsed = 0.0;
                stats_frames = 0;
            }
        }
        _ => {}
    })?;
    Ok(())
}
