//! Jellyfish "species" configuration: the static preset catalog, colour
//! parsing and the clamping applied to externally generated parameter sets.
//!
//! Every [`Configuration`] handed to the field generator or the animation
//! driver has passed through this module, so numeric fields are always
//! inside [`ranges`] and the colour is a valid RGB triple.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown preset id `{0}`")]
    UnknownPreset(String),
    #[error("invalid hex colour `{0}`")]
    InvalidColor(String),
    #[error("generated configuration is not valid JSON: {0}")]
    Malformed(String),
    #[error("generation response carried no text")]
    MissingText,
}

/// Inclusive bounds for the numeric configuration fields.
pub mod ranges {
    pub const CORE_RADIUS: (f32, f32) = (0.5, 2.0);
    pub const TENTACLE_LENGTH: (f32, f32) = (2.0, 8.0);
    pub const TENTACLE_SPREAD: (f32, f32) = (0.1, 1.5);
    pub const PARTICLE_COUNT: (u32, u32) = (1000, 5000);
    pub const MOVEMENT_SPEED: (f32, f32) = (0.1, 2.0);
    pub const NOISE_STRENGTH: (f32, f32) = (0.1, 1.0);
}

const MAX_NAME_CHARS: usize = 64;
const MAX_DESCRIPTION_CHARS: usize = 160;
const UNNAMED: &str = "Unnamed Specimen";

/// 8-bit sRGB colour, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb` or `#rgb` (leading `#` optional, any case).
    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix alone would accept a leading '+'
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |h: &str| channel(h).map(|v| v * 17);
                Ok(Self::new(
                    expand(&hex[0..1])?,
                    expand(&hex[1..2])?,
                    expand(&hex[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear-light RGB in [0, 1], suitable for an sRGB render target.
    pub fn to_linear_rgb(self) -> [f32; 3] {
        fn lin(c: u8) -> f32 {
            let s = c as f32 / 255.0;
            if s <= 0.04045 {
                s / 12.92
            } else {
                ((s + 0.055) / 1.055).powf(2.4)
            }
        }
        [lin(self.r), lin(self.g), lin(self.b)]
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: Color,
    pub core_radius: f32,
    pub tentacle_length: f32,
    pub tentacle_spread: f32,
    pub particle_count: u32,
    pub movement_speed: f32,
    pub noise_strength: f32,
}

impl Configuration {
    /// Same species, different base colour. Colour is a uniform-level
    /// parameter so this never changes the particle field key.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }
}

/// Compiled-in catalog entry.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub color: Color,
    pub core_radius: f32,
    pub tentacle_length: f32,
    pub tentacle_spread: f32,
    pub particle_count: u32,
    pub movement_speed: f32,
    pub noise_strength: f32,
}

impl Preset {
    pub fn to_configuration(&self) -> Configuration {
        Configuration {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            color: self.color,
            core_radius: self.core_radius,
            tentacle_length: self.tentacle_length,
            tentacle_spread: self.tentacle_spread,
            particle_count: self.particle_count,
            movement_speed: self.movement_speed,
            noise_strength: self.noise_strength,
        }
    }
}

pub const PRESETS: [Preset; 4] = [
    Preset {
        id: "neon-pulse",
        name: "Neon Pulse",
        description: "Cyberpunk electric blue structure",
        color: Color::new(0x00, 0xff, 0xff),
        core_radius: 1.2,
        tentacle_length: 4.5,
        tentacle_spread: 0.6,
        particle_count: 3000,
        movement_speed: 1.2,
        noise_strength: 0.6,
    },
    Preset {
        id: "deep-void",
        name: "Deep Void",
        description: "Bioluminescent deep sea phantom",
        color: Color::new(0x44, 0x55, 0xff),
        core_radius: 0.8,
        tentacle_length: 7.0,
        tentacle_spread: 0.4,
        particle_count: 2000,
        movement_speed: 0.6,
        noise_strength: 0.3,
    },
    Preset {
        id: "solar-flare",
        name: "Solar Flare",
        description: "Aggressive radioactive plasma",
        color: Color::new(0xff, 0x33, 0x00),
        core_radius: 1.5,
        tentacle_length: 3.0,
        tentacle_spread: 1.2,
        particle_count: 4000,
        movement_speed: 2.0,
        noise_strength: 0.9,
    },
    Preset {
        id: "zen-spirit",
        name: "Zen Spirit",
        description: "Peaceful drifting pastel entity",
        color: Color::new(0xe0, 0xb0, 0xff),
        core_radius: 1.0,
        tentacle_length: 5.0,
        tentacle_spread: 0.8,
        particle_count: 2500,
        movement_speed: 0.8,
        noise_strength: 0.4,
    },
];

pub fn presets() -> Vec<Configuration> {
    PRESETS.iter().map(Preset::to_configuration).collect()
}

pub fn select_preset(id: &str) -> Result<Configuration, ConfigError> {
    PRESETS
        .iter()
        .find(|p| p.id == id)
        .map(Preset::to_configuration)
        .ok_or_else(|| ConfigError::UnknownPreset(id.to_string()))
}

pub fn initial_configuration() -> Configuration {
    PRESETS[0].to_configuration()
}

/// Substituted whenever generation fails for any reason.
pub fn fallback_configuration() -> Configuration {
    Configuration {
        id: "fallback".to_string(),
        name: "Deep Sea Ghost".to_string(),
        description: "A fallback configuration due to API error.".to_string(),
        color: Color::new(0x44, 0xaa, 0xff),
        core_radius: 1.0,
        tentacle_length: 4.0,
        tentacle_spread: 0.5,
        particle_count: 2000,
        movement_speed: 0.5,
        noise_strength: 0.3,
    }
}

/// Parameter set as returned by the generative service, before validation.
///
/// Numbers are kept as `f64` so out-of-range or fractional values survive
/// deserialization and can be clamped instead of rejected.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedConfig {
    pub name: String,
    pub description: String,
    pub color: String,
    pub core_radius: f64,
    pub tentacle_length: f64,
    pub tentacle_spread: f64,
    pub particle_count: f64,
    pub movement_speed: f64,
    pub noise_strength: f64,
}

impl GeneratedConfig {
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let color = Color::parse_hex(&self.color)?;
        let name = truncate_chars(self.name.trim(), MAX_NAME_CHARS);
        let name = if name.is_empty() {
            UNNAMED.to_string()
        } else {
            name
        };
        let (lo, hi) = ranges::PARTICLE_COUNT;
        let particle_count = if self.particle_count.is_finite() {
            self.particle_count.round().clamp(lo as f64, hi as f64) as u32
        } else {
            lo
        };
        Ok(Configuration {
            id: format!("ai-{}", slugify(&name)),
            description: truncate_chars(self.description.trim(), MAX_DESCRIPTION_CHARS),
            name,
            color,
            core_radius: clamp_field(self.core_radius, ranges::CORE_RADIUS),
            tentacle_length: clamp_field(self.tentacle_length, ranges::TENTACLE_LENGTH),
            tentacle_spread: clamp_field(self.tentacle_spread, ranges::TENTACLE_SPREAD),
            particle_count,
            movement_speed: clamp_field(self.movement_speed, ranges::MOVEMENT_SPEED),
            noise_strength: clamp_field(self.noise_strength, ranges::NOISE_STRENGTH),
        })
    }
}

/// Parse the structured JSON text produced by the service into a clamped
/// configuration.
pub fn parse_generated(text: &str) -> Result<Configuration, ConfigError> {
    let raw: GeneratedConfig =
        serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    raw.into_configuration()
}

fn clamp_field(v: f64, (lo, hi): (f32, f32)) -> f32 {
    if v.is_finite() {
        (v as f32).clamp(lo, hi)
    } else {
        lo
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("specimen");
    }
    out
}
