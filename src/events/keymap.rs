// Global key bindings, independent of the DOM so they can be tested on
// the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleFullscreen,
    ToggleOverlay,
    /// Index into the preset catalog.
    SelectPreset(usize),
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "h" | "H" => Some(KeyAction::ToggleOverlay),
        "1" => Some(KeyAction::SelectPreset(0)),
        "2" => Some(KeyAction::SelectPreset(1)),
        "3" => Some(KeyAction::SelectPreset(2)),
        "4" => Some(KeyAction::SelectPreset(3)),
        _ => None,
    }
}

/// Keys typed into these elements belong to the element, not the app.
#[inline]
pub fn is_text_entry(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}
