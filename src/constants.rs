// Front-end constants: DOM wiring, labels, capture and post-processing.
//
// Animation and sensing tuning lives in `biolumen_core::constants`; this
// file only holds values that belong to the browser shell.

// DOM element ids (see index.html)
pub const CANVAS_ID: &str = "jelly-canvas";
pub const OVERLAY_ID: &str = "ui-overlay";
pub const STATUS_BADGE_ID: &str = "camera-status";
pub const DENIED_BANNER_ID: &str = "camera-denied";
pub const TENSION_METER_ID: &str = "tension-meter";
pub const CONFIG_NAME_ID: &str = "config-name";
pub const CONFIG_DESCRIPTION_ID: &str = "config-description";
pub const CONFIG_STATS_ID: &str = "config-stats";
pub const COLOR_DOT_ID: &str = "color-dot";
pub const COLOR_INPUT_ID: &str = "color-input";
pub const SWATCHES_ID: &str = "swatches";
pub const PRESET_LIST_ID: &str = "preset-list";
pub const PROMPT_FORM_ID: &str = "prompt-form";
pub const PROMPT_INPUT_ID: &str = "prompt-input";
pub const GENERATE_BUTTON_ID: &str = "generate-btn";
pub const FULLSCREEN_BUTTON_ID: &str = "fullscreen-btn";
pub const TAB_LIBRARY_ID: &str = "tab-library";
pub const TAB_LAB_ID: &str = "tab-lab";
pub const PANEL_LIBRARY_ID: &str = "panel-library";
pub const PANEL_LAB_ID: &str = "panel-lab";

// Preset buttons are created at startup with ids PRESET_BUTTON_PREFIX + preset id
pub const PRESET_BUTTON_PREFIX: &str = "preset-";
pub const SWATCH_BUTTON_PREFIX: &str = "swatch-";

pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";

// Labels
pub const STATUS_LINKED: &str = "Camera Linked";
pub const STATUS_NO_INPUT: &str = "No Input";
pub const DENIED_MESSAGE: &str = "Camera access denied. Motion gestures disabled.";
pub const GENERATE_LABEL: &str = "Generate Model";
pub const GENERATING_LABEL: &str = "Synthesizing...";

// Quick pigment palette shown next to the free colour picker
pub const SWATCHES: [&str; 10] = [
    "#00ffff", "#ff00ff", "#ff3333", "#ffff00", "#00ff00", "#ffffff", "#aa00ff", "#ff8800",
    "#0000ff", "#00ffaa",
];

// Video capture request; the sensor downsamples further before diffing
pub const CAPTURE_WIDTH: u32 = 320;
pub const CAPTURE_HEIGHT: u32 = 240;
pub const CAPTURE_FRAME_RATE: u32 = 30;
// HTMLMediaElement.HAVE_ENOUGH_DATA; earlier states can yield blank frames
pub const VIDEO_HAVE_ENOUGH_DATA: u16 = 4;

// Scene clear colour: #020205 in linear light
pub const CLEAR_COLOR: [f64; 3] = [0.000607, 0.000607, 0.001518];

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.1;
pub const BLOOM_THRESHOLD: f32 = 0.35;
// Faint halo of the configuration colour behind the jellyfish
pub const HALO_STRENGTH: f32 = 0.05;

// Orbit input
pub const WHEEL_ZOOM_PER_PIXEL: f32 = 0.001;
pub const WHEEL_ZOOM_STEP_MAX: f32 = 0.25;

// Skip DOM writes for meter changes smaller than this
pub const METER_EPSILON: f32 = 0.005;
