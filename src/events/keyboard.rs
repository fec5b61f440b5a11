use super::keymap::{action_for_key, is_text_entry, KeyAction};
use crate::{dom, overlay, ui};
use biolumen_core::{Specimen, PRESETS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| is_text_entry(&el.tag_name()))
        .unwrap_or(false)
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    specimen: &Rc<RefCell<Specimen>>,
) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() || typing_into_field(ev) {
        return;
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleFullscreen => dom::toggle_fullscreen(document),
        KeyAction::ToggleOverlay => overlay::toggle(document),
        KeyAction::SelectPreset(i) => {
            if let Some(preset) = PRESETS.get(i) {
                log::info!("[keys] preset {}", preset.id);
                ui::apply_configuration(document, specimen, preset.to_configuration());
            }
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(document: web::Document, specimen: Rc<RefCell<Specimen>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &document, &specimen);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
