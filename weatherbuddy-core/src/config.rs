use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{language::Language, provider::openweather, units::TemperatureUnit};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "WEATHERBUDDY_API_KEY";

/// Credentials and endpoint of the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,

    /// Override for tests or proxies; defaults to the public API.
    pub base_url: Option<String>,
}

impl OpenWeatherConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(openweather::DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Display name from the language picker, e.g. "Spanish".
    pub language: String,
    pub unit: TemperatureUnit,
    /// When false nothing is translated, synthesized or played.
    pub enabled: bool,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            language: Language::English.name().to_string(),
            unit: TemperatureUnit::default(),
            enabled: true,
        }
    }
}

impl NarrationConfig {
    pub fn language(&self) -> Language {
        Language::from_name(&self.language)
    }
}

/// External voice capabilities. Each command is an argv list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VoiceConfig {
    /// Player invoked as `player... <file.mp3>`; auto-detected when absent.
    pub player: Option<Vec<String>>,

    /// Captures from the microphone and prints the recognized text on stdout.
    pub recognizer: Option<Vec<String>>,

    pub translate_url: Option<String>,
    pub tts_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [openweather]
/// api_key = "..."
///
/// [narration]
/// language = "French"
/// unit = "celsius"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is not set, e.g. "warn".
    pub log_level: Option<String>,

    pub openweather: OpenWeatherConfig,
    pub narration: NarrationConfig,
    pub voice: VoiceConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    /// `WEATHERBUDDY_API_KEY` overrides the stored key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbuddy", "weatherbuddy")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.openweather.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }

    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.openweather.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
