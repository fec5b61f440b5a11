use crate::constants::{WHEEL_ZOOM_PER_PIXEL, WHEEL_ZOOM_STEP_MAX};
use biolumen_core::OrbitCamera;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
struct DragState {
    pointer: Option<i32>,
    last_x: f32,
    last_y: f32,
}

/// Drag to orbit, wheel to zoom. No panning.
pub fn wire_orbit_handlers(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(canvas, &drag);
    wire_pointermove(canvas, &drag, &orbit);
    wire_pointerup(canvas, &drag);
    wire_wheel(canvas, &orbit);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, drag: &Rc<RefCell<DragState>>) {
    let drag = drag.clone();
    let canvas_capture = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let mut d = drag.borrow_mut();
        d.pointer = Some(ev.pointer_id());
        d.last_x = ev.client_x() as f32;
        d.last_y = ev.client_y() as f32;
        _ = canvas_capture.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(
    canvas: &web::HtmlCanvasElement,
    drag: &Rc<RefCell<DragState>>,
    orbit: &Rc<RefCell<OrbitCamera>>,
) {
    let drag = drag.clone();
    let orbit = orbit.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut d = drag.borrow_mut();
        if d.pointer != Some(ev.pointer_id()) {
            return;
        }
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        orbit.borrow_mut().rotate(x - d.last_x, y - d.last_y);
        d.last_x = x;
        d.last_y = y;
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, drag: &Rc<RefCell<DragState>>) {
    let drag = drag.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut d = drag.borrow_mut();
        if d.pointer == Some(ev.pointer_id()) {
            d.pointer = None;
        }
    }) as Box<dyn FnMut(_)>);
    for kind in ["pointerup", "pointercancel"] {
        _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, orbit: &Rc<RefCell<OrbitCamera>>) {
    let orbit = orbit.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let step = (ev.delta_y() as f32 * WHEEL_ZOOM_PER_PIXEL)
            .clamp(-WHEEL_ZOOM_STEP_MAX, WHEEL_ZOOM_STEP_MAX);
        orbit.borrow_mut().zoom(step.exp());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
