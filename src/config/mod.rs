//! Knob options and configuration loading
//!
//! A knob is described by a [`KnobOptions`] record. Options come from:
//! - `data-gnob-*` attributes on the element being replaced ([`KnobOptions::from_attributes`])
//! - a `gnob.{toml,json,yaml}` file plus `GNOB_*` environment variables ([`load_options`])

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::AngularRange;

/// Attribute prefix recognised by [`KnobOptions::from_attributes`]
const ATTRIBUTE_PREFIX: &str = "data-gnob";

/// Base name of the options file inside the config directory
const OPTIONS_FILE_NAME: &str = "gnob";

/// Visual size class of the knob
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnobSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl KnobSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnobSize::Small => "small",
            KnobSize::Medium => "medium",
            KnobSize::Large => "large",
        }
    }
}

impl fmt::Display for KnobSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnobSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(KnobSize::Small),
            "medium" => Ok(KnobSize::Medium),
            "large" => Ok(KnobSize::Large),
            other => Err(format!("unknown knob size: {other}")),
        }
    }
}

/// How the knob's travel is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnobMode {
    /// Rotating face, travel measured in degrees
    #[default]
    Rotary,
    /// Travel measured in position units along a strip
    Linear,
}

impl KnobMode {
    pub fn angular_range(&self) -> AngularRange {
        match self {
            KnobMode::Rotary => AngularRange::DEGREES,
            KnobMode::Linear => AngularRange::LINEAR,
        }
    }
}

/// Construction record for a knob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobOptions {
    #[serde(default)]
    pub min: f64,

    #[serde(default = "default_max")]
    pub max: f64,

    #[serde(default = "default_step")]
    pub step: f64,

    #[serde(default)]
    pub initial: f64,

    #[serde(default)]
    pub size: KnobSize,

    /// CSS colour for the indicator dot and its glow
    #[serde(default, alias = "indicator")]
    pub indicator_color: Option<String>,

    /// Face diameter in pixels
    #[serde(default = "default_diameter")]
    pub diameter: f64,

    #[serde(default)]
    pub mode: KnobMode,
}

fn default_max() -> f64 {
    10.0
}

fn default_step() -> f64 {
    1.0
}

fn default_diameter() -> f64 {
    100.0
}

impl Default for KnobOptions {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_max(),
            step: default_step(),
            initial: 0.0,
            size: KnobSize::default(),
            indicator_color: None,
            diameter: default_diameter(),
            mode: KnobMode::default(),
        }
    }
}

/// An attribute value: numeric text becomes a number, anything else stays text
#[derive(Debug, Clone, PartialEq)]
enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => AttributeValue::Number(n),
            _ => AttributeValue::Text(raw.to_string()),
        }
    }
}

impl KnobOptions {
    /// Read options from `data-gnob-<name>` attributes.
    ///
    /// The bare `data-gnob` marker and unknown names are skipped. Numeric
    /// options given non-numeric text keep their default.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();

        for (name, raw) in attributes {
            let Some(rest) = name.strip_prefix(ATTRIBUTE_PREFIX) else {
                continue;
            };
            let key = rest.trim_start_matches('-');
            if key.is_empty() {
                continue;
            }

            let value = AttributeValue::parse(raw);
            match (key, value) {
                ("min", AttributeValue::Number(n)) => options.min = n,
                ("max", AttributeValue::Number(n)) => options.max = n,
                ("step", AttributeValue::Number(n)) => options.step = n,
                ("initial", AttributeValue::Number(n)) => options.initial = n,
                ("diameter", AttributeValue::Number(n)) => options.diameter = n,
                ("size", AttributeValue::Text(s)) => match s.parse() {
                    Ok(size) => options.size = size,
                    Err(e) => tracing::debug!("Ignoring {}: {}", name, e),
                },
                ("indicator" | "indicator-color", AttributeValue::Text(s)) => {
                    options.indicator_color = Some(s)
                }
                ("mode", AttributeValue::Text(s)) => match s.trim() {
                    "rotary" => options.mode = KnobMode::Rotary,
                    "linear" => options.mode = KnobMode::Linear,
                    other => tracing::debug!("Ignoring {}: unknown mode {}", name, other),
                },
                (_, value) => {
                    tracing::debug!("Ignoring unrecognised attribute {}={:?}", name, value)
                }
            }
        }

        options
    }
}

/// Get config directory (GNOB_CONFIG_DIR or platform default)
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("GNOB_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join("Library/Application Support/gnob");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return std::path::PathBuf::from(xdg).join("gnob");
        }
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join(".config/gnob");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return std::path::PathBuf::from(appdata).join("gnob");
        }
    }

    // Fallback to current directory
    std::path::PathBuf::from(".")
}

/// Load knob options: defaults < `<dir>/gnob.*` < `GNOB_*` environment
pub fn load_options(config_dir: &std::path::Path) -> Result<KnobOptions> {
    let builder = ::config::Config::builder()
        .add_source(
            ::config::File::with_name(&config_dir.join(OPTIONS_FILE_NAME).to_string_lossy())
                .required(false),
        )
        // GNOB_MAX, GNOB_STEP, GNOB_INDICATOR_COLOR, ...
        .add_source(
            ::config::Environment::with_prefix("GNOB")
                .try_parsing(true)
                .ignore_empty(true),
        );

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
