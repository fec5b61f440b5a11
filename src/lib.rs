#![cfg(target_arch = "wasm32")]
use biolumen_core::{initial_configuration, OrbitCamera, SensorStatus, Specimen, TensionSignal};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod capture;
mod capture_slot;
mod constants;
mod dom;
mod events;
mod frame;
mod gemini;
mod overlay;
mod render;
mod ui;

use capture_slot::CaptureSlot;
use constants::CANVAS_ID;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

type SharedCapture = Rc<RefCell<CaptureSlot<capture::CaptureHandle>>>;

fn open_capture(document: &web::Document, tension: &TensionSignal, slot: &SharedCapture) {
    let attempt = slot.borrow_mut().open();
    let slot = slot.clone();
    let document = document.clone();
    let tension = tension.clone();
    spawn_local(async move {
        let Some(handle) = capture::start(document.clone(), tension).await else {
            return;
        };
        let stale = slot.borrow_mut().fulfil(attempt, handle);
        if stale.is_some() {
            log::info!("[camera] capture resolved after page hide; releasing");
            drop(stale);
            if slot.borrow().is_closed() {
                overlay::set_camera_status(&document, SensorStatus::Idle);
            }
        }
    });
}

/// Run the camera for as long as the page is shown. `pagehide` releases the
/// stream (or the attempt still opening it); a page restored from the
/// back/forward cache opens it again.
fn wire_capture_lifecycle(document: &web::Document, tension: TensionSignal) {
    let slot: SharedCapture = Rc::new(RefCell::new(CaptureSlot::default()));
    open_capture(document, &tension, &slot);

    let Some(window) = web::window() else {
        return;
    };
    let pagehide = {
        let slot = slot.clone();
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            let released = slot.borrow_mut().close();
            drop(released);
            overlay::set_camera_status(&document, SensorStatus::Idle);
        }) as Box<dyn FnMut()>)
    };
    _ = window.add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref());
    pagehide.forget();

    let document = document.clone();
    let pageshow = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if ev.persisted() && slot.borrow().is_closed() {
            log::info!("[camera] page restored; reopening capture");
            open_capture(&document, &tension, &slot);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pageshow", pageshow.as_ref().unchecked_ref());
    pageshow.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("biolumen-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    wire_canvas_resize(&canvas);

    overlay::build_catalog(&document)?;

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let config = initial_configuration();
    overlay::show_configuration(&document, &config);
    let specimen = Rc::new(RefCell::new(Specimen::new(config, seed)));
    let tension = TensionSignal::new();
    let orbit = Rc::new(RefCell::new(OrbitCamera::new()));

    ui::wire_controls(&ui::UiWiring {
        document: document.clone(),
        specimen: specimen.clone(),
        generating: Rc::new(Cell::new(false)),
    });
    events::wire_global_keydown(document.clone(), specimen.clone());
    events::wire_orbit_handlers(&canvas, orbit.clone());

    wire_capture_lifecycle(&document, tension.clone());

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        specimen,
        tension,
        orbit,
        driver: Default::default(),
        document,
        canvas,
        gpu,
        uploaded_generation: None,
        last_meter: -1.0,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
