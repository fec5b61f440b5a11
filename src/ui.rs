use crate::constants::*;
use crate::gemini::GeminiTransport;
use crate::{dom, overlay};
use biolumen_core::{generate_from_prompt, Color, Configuration, Specimen, PRESETS};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Swap in a new configuration and refresh the panel. The field is
/// rebuilt inside `Specimen::replace` only when its structure changed.
pub fn apply_configuration(
    document: &web::Document,
    specimen: &Rc<RefCell<Specimen>>,
    config: Configuration,
) {
    overlay::show_configuration(document, &config);
    specimen.borrow_mut().replace(config);
}

fn apply_color(document: &web::Document, specimen: &Rc<RefCell<Specimen>>, color: Color) {
    let mut s = specimen.borrow_mut();
    s.set_color(color);
    overlay::show_color(document, s.config());
}

pub struct UiWiring {
    pub document: web::Document,
    pub specimen: Rc<RefCell<Specimen>>,
    pub generating: Rc<Cell<bool>>,
}

pub fn wire_controls(w: &UiWiring) {
    wire_presets(w);
    wire_tabs(w);
    wire_pigments(w);
    wire_prompt(w);
    dom::add_click_listener(&w.document, FULLSCREEN_BUTTON_ID, {
        let document = w.document.clone();
        move || dom::toggle_fullscreen(&document)
    });
}

fn wire_presets(w: &UiWiring) {
    for preset in PRESETS.iter().copied() {
        let document = w.document.clone();
        let specimen = w.specimen.clone();
        dom::add_click_listener(
            &w.document,
            &format!("{PRESET_BUTTON_PREFIX}{}", preset.id),
            move || {
                log::info!("[ui] preset {}", preset.id);
                apply_configuration(&document, &specimen, preset.to_configuration());
            },
        );
    }
}

fn wire_tabs(w: &UiWiring) {
    for (id, lab) in [(TAB_LIBRARY_ID, false), (TAB_LAB_ID, true)] {
        let document = w.document.clone();
        dom::add_click_listener(&w.document, id, move || overlay::select_tab(&document, lab));
    }
    overlay::select_tab(&w.document, false);
}

fn wire_pigments(w: &UiWiring) {
    for (i, swatch) in SWATCHES.iter().copied().enumerate() {
        let document = w.document.clone();
        let specimen = w.specimen.clone();
        dom::add_click_listener(&w.document, &format!("{SWATCH_BUTTON_PREFIX}{i}"), move || {
            match Color::parse_hex(swatch) {
                Ok(c) => apply_color(&document, &specimen, c),
                Err(e) => log::warn!("[ui] {e}"),
            }
        });
    }

    let Some(input) = dom::by_id::<web::HtmlInputElement>(&w.document, COLOR_INPUT_ID) else {
        return;
    };
    let document = w.document.clone();
    let specimen = w.specimen.clone();
    let source = input.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        // Colour inputs always yield #rrggbb; ignore anything else
        if let Ok(c) = Color::parse_hex(&source.value()) {
            apply_color(&document, &specimen, c);
        }
    }) as Box<dyn FnMut(_)>);
    _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_prompt(w: &UiWiring) {
    let Some(form) = w.document.get_element_by_id(PROMPT_FORM_ID) else {
        return;
    };
    let document = w.document.clone();
    let specimen = w.specimen.clone();
    let generating = w.generating.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        let Some(input) = dom::by_id::<web::HtmlInputElement>(&document, PROMPT_INPUT_ID) else {
            return;
        };
        let prompt = input.value().trim().to_string();
        if prompt.is_empty() || generating.get() {
            return;
        }
        start_generation(document.clone(), specimen.clone(), generating.clone(), prompt);
    }) as Box<dyn FnMut(_)>);
    _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run one generation request. The current configuration keeps rendering
/// until the result (or the fallback) is swapped in as a whole.
fn start_generation(
    document: web::Document,
    specimen: Rc<RefCell<Specimen>>,
    generating: Rc<Cell<bool>>,
    prompt: String,
) {
    generating.set(true);
    overlay::set_generating(&document, true);
    log::info!("[generate] requesting species for {:?}", prompt);
    spawn_local(async move {
        let transport = GeminiTransport::from_page();
        let config = generate_from_prompt(&transport, &prompt).await;
        apply_configuration(&document, &specimen, config);
        generating.set(false);
        overlay::set_generating(&document, false);
    });
}
