// src/config.rs
use crate::constants::DEFAULT_URL_TTL_SECS;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// TOML configuration for the notes board
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_url_ttl_secs")]
    pub url_ttl_secs: u64,
    #[serde(default = "default_signing_secret")]
    pub signing_secret: String,
    /// Check that an object exists before handing out a link to it
    #[serde(default)]
    pub validate_object_existence: bool,
}

/// Color tokens and font for the board
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub name: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_primary_hover_color")]
    pub primary_hover_color: String,
    #[serde(default = "default_primary_text_color")]
    pub primary_text_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_url_ttl_secs() -> u64 { DEFAULT_URL_TTL_SECS }
fn default_signing_secret() -> String { "change-me".to_string() }
fn default_theme_name() -> String { "sticky-notes-theme".to_string() }
fn default_primary_color() -> String { "#FFEB3B".to_string() }
fn default_primary_hover_color() -> String { "#FDD835".to_string() }
fn default_primary_text_color() -> String { "#000000".to_string() }
fn default_font_family() -> String { "'Patrick Hand', cursive".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url_ttl_secs: default_url_ttl_secs(),
            signing_secret: default_signing_secret(),
            validate_object_existence: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            primary_color: default_primary_color(),
            primary_hover_color: default_primary_hover_color(),
            primary_text_color: default_primary_text_color(),
            font_family: default_font_family(),
        }
    }
}

impl ThemeConfig {
    /// Theme tokens land inside a `<style>` block, so only plain values pass
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("primary_color", &self.primary_color),
            ("primary_hover_color", &self.primary_hover_color),
            ("primary_text_color", &self.primary_text_color),
        ] {
            if !is_hex_color(value) {
                bail!("theme.{key} must be a hex color like #FFEB3B, got {value:?}");
            }
        }
        if self.font_family.contains(['<', '>', '{', '}', ';']) {
            bail!("theme.font_family contains characters not allowed in CSS: {:?}", self.font_family);
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;
        config.theme.validate()?;

        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(?path, "No config file, using defaults");
            Ok(Self::default())
        }
    }
}
