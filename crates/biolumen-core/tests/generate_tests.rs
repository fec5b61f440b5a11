// Host-side tests for prompt-driven generation with stand-in transports.

use anyhow::anyhow;
use biolumen_core::*;
use serde_json::json;
use std::cell::RefCell;

struct FailingTransport;

impl Transport for FailingTransport {
    async fn post_json(&self, _body: String) -> anyhow::Result<String> {
        Err(anyhow!("network unreachable"))
    }
}

/// Replies with a fixed body and remembers the last request.
struct CannedTransport {
    reply: String,
    last_request: RefCell<Option<String>>,
}

impl CannedTransport {
    fn wrapping(text: &str) -> Self {
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        });
        Self {
            reply: reply.to_string(),
            last_request: RefCell::new(None),
        }
    }

    fn raw(body: &str) -> Self {
        Self {
            reply: body.to_string(),
            last_request: RefCell::new(None),
        }
    }
}

impl Transport for CannedTransport {
    async fn post_json(&self, body: String) -> anyhow::Result<String> {
        *self.last_request.borrow_mut() = Some(body);
        Ok(self.reply.clone())
    }
}

fn generate<T: Transport>(t: &T, description: &str) -> Configuration {
    pollster::block_on(generate_from_prompt(t, description))
}

#[test]
fn transport_failure_yields_fallback() {
    let config = generate(&FailingTransport, "angry plasma");
    assert_eq!(config, fallback_configuration());
    assert_eq!(config.name, "Deep Sea Ghost");
    assert_eq!(config.particle_count, 2000);
    assert_eq!(config.color.to_hex(), "#44aaff");
}

#[test]
fn out_of_range_values_are_clamped() {
    let text = json!({
        "name": "  Abyssal Lantern ",
        "description": "Slow and enormous",
        "color": "#12ab90",
        "coreRadius": 9.0,
        "tentacleLength": 0.5,
        "tentacleSpread": 0.7,
        "particleCount": 12000.6,
        "movementSpeed": -3.0,
        "noiseStrength": 0.55
    })
    .to_string();
    let config = generate(&CannedTransport::wrapping(&text), "huge slow lantern");
    assert_eq!(config.name, "Abyssal Lantern");
    assert_eq!(config.id, "ai-abyssal-lantern");
    assert_eq!(config.color, Color::new(0x12, 0xab, 0x90));
    assert_eq!(config.core_radius, 2.0);
    assert_eq!(config.tentacle_length, 2.0);
    assert!((config.tentacle_spread - 0.7).abs() < 1e-6);
    assert_eq!(config.particle_count, 5000);
    assert_eq!(config.movement_speed, 0.1);
    assert!((config.noise_strength - 0.55).abs() < 1e-6);
}

#[test]
fn fractional_particle_count_is_rounded() {
    let text = json!({
        "name": "Drift",
        "description": "",
        "color": "#fff",
        "coreRadius": 1.0,
        "tentacleLength": 3.0,
        "tentacleSpread": 0.5,
        "particleCount": 2499.5,
        "movementSpeed": 1.0,
        "noiseStrength": 0.2
    })
    .to_string();
    let config = generate(&CannedTransport::wrapping(&text), "drift");
    assert_eq!(config.particle_count, 2500);
    assert_eq!(config.color, Color::new(255, 255, 255));
}

#[test]
fn missing_field_yields_fallback() {
    let text = json!({
        "name": "Half",
        "description": "no numbers",
        "color": "#00ff00"
    })
    .to_string();
    let config = generate(&CannedTransport::wrapping(&text), "half");
    assert_eq!(config, fallback_configuration());
}

#[test]
fn invalid_colour_yields_fallback() {
    let text = json!({
        "name": "Bad Paint",
        "description": "",
        "color": "ultraviolet",
        "coreRadius": 1.0,
        "tentacleLength": 3.0,
        "tentacleSpread": 0.5,
        "particleCount": 2000,
        "movementSpeed": 1.0,
        "noiseStrength": 0.2
    })
    .to_string();
    let config = generate(&CannedTransport::wrapping(&text), "bad paint");
    assert_eq!(config, fallback_configuration());
}

#[test]
fn signed_hex_colour_yields_fallback() {
    for color in ["+f+f+f", "#+1+2+3", "#+a+b+c"] {
        let text = json!({
            "name": "Signed Paint",
            "description": "",
            "color": color,
            "coreRadius": 1.0,
            "tentacleLength": 3.0,
            "tentacleSpread": 0.5,
            "particleCount": 2000,
            "movementSpeed": 1.0,
            "noiseStrength": 0.2
        })
        .to_string();
        assert!(parse_generated(&text).is_err(), "{color:?}");
        let config = generate(&CannedTransport::wrapping(&text), "signed paint");
        assert_eq!(config, fallback_configuration(), "{color:?}");
    }
}

#[test]
fn empty_or_garbage_envelope_yields_fallback() {
    for body in ["", "not json", "{}", r#"{"candidates":[]}"#] {
        let config = generate(&CannedTransport::raw(body), "anything");
        assert_eq!(config, fallback_configuration(), "body {body:?}");
    }
    let config = generate(&CannedTransport::wrapping("   "), "blank text");
    assert_eq!(config, fallback_configuration());
}

#[test]
fn request_carries_prompt_and_schema() {
    let transport = CannedTransport::raw("{}");
    generate(&transport, "a calm ghost");
    let sent = transport.last_request.borrow().clone().expect("request sent");
    let body: serde_json::Value = serde_json::from_str(&sent).expect("request is json");
    let prompt = body
        .pointer("/contents/0/parts/0/text")
        .and_then(|v| v.as_str())
        .expect("prompt text");
    assert!(prompt.contains("a calm ghost"));
    assert_eq!(
        body.pointer("/generationConfig/responseMimeType"),
        Some(&json!("application/json"))
    );
    let required = body
        .pointer("/generationConfig/responseSchema/required")
        .and_then(|v| v.as_array())
        .expect("required list");
    assert_eq!(required.len(), 9);
    assert!(required.contains(&json!("particleCount")));
}

#[test]
fn generation_url_targets_model() {
    let url = generation_url("abc123");
    assert!(url.starts_with(GENERATION_ENDPOINT));
    assert!(url.contains(GENERATION_MODEL));
    assert!(url.ends_with(":generateContent?key=abc123"));
}

#[test]
fn unknown_preset_is_an_error() {
    assert_eq!(
        select_preset("kraken"),
        Err(ConfigError::UnknownPreset("kraken".to_string()))
    );
    for p in PRESETS {
        assert_eq!(select_preset(p.id).expect("catalog id").name, p.name);
    }
}

#[test]
fn configuration_serializes_in_camel_case() {
    let value = serde_json::to_value(initial_configuration()).expect("serialize");
    assert_eq!(value["color"], json!("#00ffff"));
    assert_eq!(value["particleCount"], json!(3000));
    assert!(value.get("coreRadius").is_some());
}
