//! Service settings (JSON file plus environment overrides).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct AppSettings {
    pub bind_addr: String,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub acceptance_threshold: f64,
    pub min_context_window: usize,
    pub default_sound_duration: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".into(),
            openai_api_key: None,
            elevenlabs_api_key: None,
            acceptance_threshold: 0.70,
            min_context_window: 3,
            default_sound_duration: 5.0,
        }
    }
}

impl AppSettings {
    pub fn normalize(&mut self) {
        if self.bind_addr.trim().is_empty() {
            self.bind_addr = Self::default().bind_addr;
        }
        self.acceptance_threshold = self.acceptance_threshold.clamp(0.5, 0.95);
        self.min_context_window = self.min_context_window.clamp(1, 10);
        self.default_sound_duration = self.default_sound_duration.clamp(0.5, 22.0);
        self.openai_api_key = normalize_key(self.openai_api_key.as_deref());
        self.elevenlabs_api_key = normalize_key(self.elevenlabs_api_key.as_deref());
    }

    /// Environment variables win over the settings file so deployments can
    /// inject keys without writing them to disk.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("CUEMARK_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("ELEVEN_LABS_API_KEY") {
            self.elevenlabs_api_key = Some(key);
        }
        if let Ok(raw) = std::env::var("CUEMARK_ACCEPTANCE_THRESHOLD") {
            if let Ok(value) = raw.parse::<f64>() {
                self.acceptance_threshold = value;
            }
        }
        if let Ok(raw) = std::env::var("CUEMARK_MIN_CONTEXT_WINDOW") {
            if let Ok(value) = raw.parse::<usize>() {
                self.min_context_window = value;
            }
        }
    }
}

fn normalize_key(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

pub fn default_settings_path() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("cuemark")
        .join("settings.json")
}

pub fn load_settings(path: &Path) -> AppSettings {
    let mut settings = fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<AppSettings>(&raw).ok())
        .unwrap_or_default();
    settings.apply_env_overrides();
    settings.normalize();
    settings
}
