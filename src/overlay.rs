use crate::constants::*;
use crate::dom;
use biolumen_core::{Configuration, SensorStatus, PRESETS};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        dom::set_visible(&el, true);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        dom::set_visible(&el, false);
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(OVERLAY_ID)
        .map(|el| !dom::is_visible(&el))
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Status badge plus the persistent banner shown after a denial.
pub fn set_camera_status(document: &web::Document, status: SensorStatus) {
    if let Some(badge) = document.get_element_by_id(STATUS_BADGE_ID) {
        let linked = status == SensorStatus::Active;
        badge.set_text_content(Some(if linked { STATUS_LINKED } else { STATUS_NO_INPUT }));
        let cl = badge.class_list();
        if linked {
            _ = cl.add_1(ACTIVE_CLASS);
        } else {
            _ = cl.remove_1(ACTIVE_CLASS);
        }
    }
    if let Some(banner) = document.get_element_by_id(DENIED_BANNER_ID) {
        let denied = status == SensorStatus::Denied;
        if denied {
            banner.set_text_content(Some(DENIED_MESSAGE));
        }
        dom::set_visible(&banner, denied);
    }
}

pub fn set_tension_meter(document: &web::Document, tension: f32) {
    if let Some(el) = dom::by_id::<web::HtmlElement>(document, TENSION_METER_ID) {
        let pct = (tension.clamp(0.0, 1.0) * 100.0).round();
        _ = el.style().set_property("height", &format!("{pct}%"));
    }
}

pub fn set_generating(document: &web::Document, generating: bool) {
    if let Some(btn) = dom::by_id::<web::HtmlButtonElement>(document, GENERATE_BUTTON_ID) {
        btn.set_disabled(generating);
        btn.set_text_content(Some(if generating {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }));
    }
}

/// Name, description, stats, pigment and which catalog entry is active.
pub fn show_configuration(document: &web::Document, config: &Configuration) {
    dom::set_text(document, CONFIG_NAME_ID, &config.name);
    dom::set_text(document, CONFIG_DESCRIPTION_ID, &config.description);
    dom::set_text(
        document,
        CONFIG_STATS_ID,
        &format!(
            "CORE: {:.1} \u{b7} SPREAD: {:.1} \u{b7} PARTICLES: {} \u{b7} NOISE: {:.1}",
            config.core_radius, config.tentacle_spread, config.particle_count, config.noise_strength
        ),
    );
    show_color(document, config);

    for preset in PRESETS.iter() {
        let id = format!("{PRESET_BUTTON_PREFIX}{}", preset.id);
        if let Some(el) = document.get_element_by_id(&id) {
            let cl = el.class_list();
            if preset.id == config.id {
                _ = cl.add_1(ACTIVE_CLASS);
            } else {
                _ = cl.remove_1(ACTIVE_CLASS);
            }
        }
    }
}

pub fn show_color(document: &web::Document, config: &Configuration) {
    let hex = config.color.to_hex();
    if let Some(dot) = dom::by_id::<web::HtmlElement>(document, COLOR_DOT_ID) {
        _ = dot.style().set_property("background-color", &hex);
    }
    if let Some(input) = dom::by_id::<web::HtmlInputElement>(document, COLOR_INPUT_ID) {
        input.set_value(&hex);
    }
    for (i, swatch) in SWATCHES.iter().enumerate() {
        if let Some(el) = document.get_element_by_id(&format!("{SWATCH_BUTTON_PREFIX}{i}")) {
            let cl = el.class_list();
            if swatch.eq_ignore_ascii_case(&hex) {
                _ = cl.add_1(ACTIVE_CLASS);
            } else {
                _ = cl.remove_1(ACTIVE_CLASS);
            }
        }
    }
}

/// Switch between the preset library and the generation lab.
pub fn select_tab(document: &web::Document, lab: bool) {
    for (tab, panel, active) in [
        (TAB_LIBRARY_ID, PANEL_LIBRARY_ID, !lab),
        (TAB_LAB_ID, PANEL_LAB_ID, lab),
    ] {
        if let Some(el) = document.get_element_by_id(tab) {
            let cl = el.class_list();
            if active {
                _ = cl.add_1(ACTIVE_CLASS);
            } else {
                _ = cl.remove_1(ACTIVE_CLASS);
            }
        }
        if let Some(el) = document.get_element_by_id(panel) {
            dom::set_visible(&el, active);
        }
    }
}

/// Populate the library grid and the swatch row. Called once at startup.
pub fn build_catalog(document: &web::Document) -> anyhow::Result<()> {
    let js_err = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);
    if let Some(list) = document.get_element_by_id(PRESET_LIST_ID) {
        for preset in PRESETS.iter() {
            let btn: web::HtmlElement = document
                .create_element("button")
                .map_err(js_err)?
                .dyn_into()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            btn.set_id(&format!("{PRESET_BUTTON_PREFIX}{}", preset.id));
            btn.set_class_name("preset");
            _ = btn.style().set_property("--preset-color", &preset.color.to_hex());
            btn.set_inner_html(&format!(
                "<span class=\"preset-name\">{}</span><span class=\"preset-desc\">{}</span>",
                preset.name, preset.description
            ));
            list.append_child(&btn).map_err(js_err)?;
        }
    }
    if let Some(row) = document.get_element_by_id(SWATCHES_ID) {
        for (i, swatch) in SWATCHES.iter().enumerate() {
            let btn: web::HtmlElement = document
                .create_element("button")
                .map_err(js_err)?
                .dyn_into()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            btn.set_id(&format!("{SWATCH_BUTTON_PREFIX}{i}"));
            btn.set_class_name("swatch");
            _ = btn.style().set_property("background-color", swatch);
            row.append_child(&btn).map_err(js_err)?;
        }
    }
    Ok(())
}
