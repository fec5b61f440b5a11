// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use biolumen_core::Color;
use constants::*;
use std::collections::HashSet;

#[test]
fn swatches_are_distinct_valid_hex_colors() {
    let mut seen = HashSet::new();
    for s in SWATCHES {
        let c = Color::parse_hex(s).expect("swatch parses");
        // Stored lowercase so the active swatch matches Color::to_hex
        assert_eq!(c.to_hex(), s);
        assert!(seen.insert(s), "duplicate swatch {s}");
    }
}

#[test]
fn dom_ids_are_unique() {
    let ids = [
        CANVAS_ID,
        OVERLAY_ID,
        STATUS_BADGE_ID,
        DENIED_BANNER_ID,
        TENSION_METER_ID,
        CONFIG_NAME_ID,
        CONFIG_DESCRIPTION_ID,
        CONFIG_STATS_ID,
        COLOR_DOT_ID,
        COLOR_INPUT_ID,
        SWATCHES_ID,
        PRESET_LIST_ID,
        PROMPT_FORM_ID,
        PROMPT_INPUT_ID,
        GENERATE_BUTTON_ID,
        FULLSCREEN_BUTTON_ID,
        TAB_LIBRARY_ID,
        TAB_LAB_ID,
        PANEL_LIBRARY_ID,
        PANEL_LAB_ID,
    ];
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn generated_button_ids_do_not_collide_with_static_ids() {
    for preset in biolumen_core::PRESETS.iter() {
        let id = format!("{PRESET_BUTTON_PREFIX}{}", preset.id);
        assert_ne!(id, PRESET_LIST_ID);
    }
    for i in 0..SWATCHES.len() {
        assert_ne!(format!("{SWATCH_BUTTON_PREFIX}{i}"), SWATCHES_ID);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn capture_request_covers_sensor_resolution() {
    assert!(CAPTURE_WIDTH >= biolumen_core::SAMPLE_WIDTH);
    assert!(CAPTURE_HEIGHT >= biolumen_core::SAMPLE_HEIGHT);
    assert!(CAPTURE_FRAME_RATE > 0);
}

#[test]
fn sampling_waits_for_playable_video() {
    // HTMLMediaElement.HAVE_ENOUGH_DATA
    assert_eq!(VIDEO_HAVE_ENOUGH_DATA, 4);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn post_and_input_tuning_within_bounds() {
    assert!(BLOOM_STRENGTH > 0.0);
    assert!(BLOOM_THRESHOLD > 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(HALO_STRENGTH >= 0.0 && HALO_STRENGTH < 1.0);
    assert!(WHEEL_ZOOM_PER_PIXEL > 0.0);
    assert!(WHEEL_ZOOM_STEP_MAX > 0.0 && WHEEL_ZOOM_STEP_MAX < 1.0);
    assert!(METER_EPSILON > 0.0 && METER_EPSILON < 0.05);
    for c in CLEAR_COLOR {
        assert!((0.0..0.01).contains(&c), "clear colour should stay near black");
    }
}
