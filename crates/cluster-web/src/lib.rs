#![cfg(target_arch = "wasm32")]
use cluster_core::{FieldPreset, InputCells, MountOptions, Visualization};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cluster-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("no entropy source ({}), using default seed", e);
            cluster_core::constants::DEFAULT_SEED
        }
    }
}

fn mount_options(window: &web::Window) -> MountOptions {
    let (mut opts, warnings) = MountOptions::from_query(&dom::query_string(window));
    for w in warnings {
        log::warn!("[config] {}", w);
    }
    if opts.seed.is_none() {
        opts.seed = Some(entropy_seed());
    }
    opts
}

async fn init() -> anyhow::Result<()> {
    // Pages can re-run the start hook (hot reload); mount only once.
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let opts = mount_options(&window);

    let mut mounts = Vec::new();
    for preset in FieldPreset::ALL {
        if !opts.wants(preset) {
            continue;
        }
        let Some(canvas) = dom::find_canvas(&document, preset.canvas_id()) else {
            log::info!("[{}] no #{} on this page, skipping", preset, preset.canvas_id());
            continue;
        };
        let config = opts.scene_config(preset);
        let vis = Visualization::mount(&config, opts.seed_for(preset))
            .map_err(|e| anyhow::anyhow!("[{}] {}", preset, e))?;
        dom::sync_canvas_backing_size(&canvas);
        let gpu = frame::init_gpu(&canvas, &vis, config.camera.clone()).await;
        log::info!(
            "[{}] mounted {} particles on #{} (gpu: {})",
            preset,
            vis.field().len(),
            preset.canvas_id(),
            gpu.is_some()
        );
        mounts.push(frame::Mount {
            preset,
            canvas,
            vis,
            gpu,
        });
    }

    if mounts.is_empty() {
        anyhow::bail!("no visualization canvas found");
    }

    let inputs = InputCells::new();
    let canvases: Vec<web::HtmlCanvasElement> = mounts.iter().map(|m| m.canvas.clone()).collect();
    events::wire_input_handlers(&inputs, &canvases);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(mounts, inputs)));
    frame::start_loop(frame_ctx);
    Ok(())
}
