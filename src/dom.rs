use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Typed lookup by id; `None` if the element is missing or of another type.
pub fn by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Toggle the `hidden` class, with an inline style fallback for pages
/// without the stylesheet.
pub fn set_visible(el: &web::Element, visible: bool) {
    let cl = el.class_list();
    if visible {
        _ = cl.remove_1(crate::constants::HIDDEN_CLASS);
        _ = el.remove_attribute("style");
    } else {
        _ = cl.add_1(crate::constants::HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn is_visible(el: &web::Element) -> bool {
    if el.class_list().contains(crate::constants::HIDDEN_CLASS) {
        return false;
    }
    !el.get_attribute("style")
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

pub fn toggle_fullscreen(document: &web::Document) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Some(root) = document.document_element() {
        _ = root.request_fullscreen();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
