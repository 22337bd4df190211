use crate::render;
use cluster_core::{FieldError, FieldPreset, InputCells, Visualization};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Seconds between frame-rate reports in the debug log.
const STATS_INTERVAL_SEC: f32 = 5.0;

/// One visualization bound to one canvas.
pub struct Mount<'a> {
    pub preset: FieldPreset,
    pub canvas: web::HtmlCanvasElement,
    pub vis: Visualization,
    pub gpu: Option<render::GpuState<'a>>,
}

pub struct FrameContext<'a> {
    pub mounts: Vec<Mount<'a>>,
    pub inputs: InputCells,

    pub last_instant: Instant,
    pub stats_elapsed: f32,
    pub stats_frames: u32,
    pub rejected_frames: u64,
}

impl<'a> FrameContext<'a> {
    pub fn new(mounts: Vec<Mount<'a>>, inputs: InputCells) -> Self {
        Self {
            mounts,
            inputs,
            last_instant: Instant::now(),
            stats_elapsed: 0.0,
            stats_frames: 0,
            rejected_frames: 0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // One read of each input per tick; every mount sees the same sample.
        let input = self.inputs.snapshot();

        for mount in &mut self.mounts {
            match mount.vis.step(input) {
                Ok(()) => {}
                Err(FieldError::InvalidInput(msg)) => {
                    self.rejected_frames += 1;
                    log::warn!("[{}] skipped frame: {}", mount.preset, msg);
                    continue;
                }
                Err(e) => {
                    log::error!("[{}] step error: {}", mount.preset, e);
                    continue;
                }
            }

            if let Some(g) = &mut mount.gpu {
                g.resize_if_needed(mount.canvas.width(), mount.canvas.height());
                match g.render(&mount.vis) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                    Err(e) => log::error!("[{}] render error: {:?}", mount.preset, e),
                }
            }
        }

        self.stats_frames += 1;
        self.stats_elapsed += dt_sec;
        if self.stats_elapsed >= STATS_INTERVAL_SEC {
            log::debug!(
                "[frame] {:.1} fps, {} mounts, {} rejected",
                self.stats_frames as f32 / self.stats_elapsed,
                self.mounts.len(),
                self.rejected_frames
            );
            self.stats_elapsed = 0.0;
            self.stats_frames = 0;
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    vis: &Visualization,
    camera: cluster_core::Camera,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, camera, vis.field().len()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
