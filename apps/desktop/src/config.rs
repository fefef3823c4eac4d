use std::{collections::HashMap, fs};

use anyhow::Context;
use client_core::ClientConfig;

pub const SETTINGS_FILE: &str = "recipe_desktop.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub log_filter: String,
    pub session_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:1111".into(),
            log_filter: "info".into(),
            session_token: None,
        }
    }
}

impl Settings {
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        ClientConfig::new(&self.backend_url)
            .with_context(|| format!("invalid backend url '{}'", self.backend_url))
    }
}

pub fn load_settings() -> Settings {
    let file_raw = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file_raw.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment variables. Later
/// sources win; unreadable values are skipped.
fn resolve_settings(file_raw: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_raw {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("backend_url") {
                settings.backend_url = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
            if let Some(v) = file_cfg.get("session_token") {
                settings.session_token = Some(v.clone());
            }
        }
    }

    if let Some(v) = env("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__SESSION_TOKEN").filter(|v| !v.trim().is_empty()) {
        settings.session_token = Some(v);
    }

    settings
}
