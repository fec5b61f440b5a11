//! Text-to-configuration generation against a `generateContent` style API.
//!
//! The HTTP plumbing lives behind [`Transport`] so the front-end can use
//! `fetch` while tests substitute canned or failing transports. Whatever
//! happens on the wire, [`generate_from_prompt`] resolves to a usable
//! [`Configuration`].

use crate::config::{fallback_configuration, parse_generated, ConfigError, Configuration};
use serde_json::{json, Value};
use std::future::Future;

pub const GENERATION_MODEL: &str = "gemini-2.5-flash";
pub const GENERATION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const REQUIRED_FIELDS: [&str; 9] = [
    "name",
    "description",
    "color",
    "coreRadius",
    "tentacleLength",
    "tentacleSpread",
    "particleCount",
    "movementSpeed",
    "noiseStrength",
];

/// Sends a JSON request body and yields the raw response body.
pub trait Transport {
    fn post_json(&self, body: String) -> impl Future<Output = anyhow::Result<String>>;
}

pub fn generation_url(api_key: &str) -> String {
    format!("{GENERATION_ENDPOINT}/{GENERATION_MODEL}:generateContent?key={api_key}")
}

pub fn generation_prompt(description: &str) -> String {
    format!(
        "Generate a configuration for a 3D particle jellyfish based on this mood/description: \"{}\".\n\
         The output must be a valid JSON object.\n\n\
         Parameters guide:\n\
         - color: Hex code (e.g., #00ffff)\n\
         - coreRadius: 0.5 to 2.0 (size of the bell)\n\
         - tentacleLength: 2.0 to 8.0 (length of trails)\n\
         - tentacleSpread: 0.1 to 1.5 (how wide trails go)\n\
         - particleCount: 1000 to 5000 (density)\n\
         - movementSpeed: 0.1 to 2.0 (animation speed)\n\
         - noiseStrength: 0.1 to 1.0 (turbulence)\n",
        description.trim()
    )
}

fn response_schema() -> Value {
    let mut properties = serde_json::Map::new();
    for field in REQUIRED_FIELDS {
        let ty = match field {
            "name" | "description" | "color" => "STRING",
            _ => "NUMBER",
        };
        properties.insert(field.to_string(), json!({ "type": ty }));
    }
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": REQUIRED_FIELDS,
    })
}

pub fn generation_request_body(description: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": generation_prompt(description) }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
    })
}

/// Extract the structured text from a `generateContent` response body and
/// turn it into a clamped configuration.
pub fn parse_generation_response(body: &str) -> Result<Configuration, ConfigError> {
    let envelope: Value =
        serde_json::from_str(body).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    let text = envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingText)?;
    parse_generated(text)
}

async fn try_generate<T: Transport>(
    transport: &T,
    description: &str,
) -> anyhow::Result<Configuration> {
    let body = generation_request_body(description).to_string();
    let response = transport.post_json(body).await?;
    Ok(parse_generation_response(&response)?)
}

/// Never fails: transport, parse and schema errors are logged and replaced
/// by [`fallback_configuration`].
pub async fn generate_from_prompt<T: Transport>(
    transport: &T,
    description: &str,
) -> Configuration {
    match try_generate(transport, description).await {
        Ok(config) => {
            log::info!(
                "[generate] '{}' particles={} color={}",
                config.name,
                config.particle_count,
                config.color.to_hex()
            );
            config
        }
        Err(e) => {
            log::warn!("[generate] falling back: {e:#}");
            fallback_configuration()
        }
    }
}
