use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "bike_taxi.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub backend_url: String,
    /// Per-request timeout. Unset means requests may wait forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Applies a command-line override on top of file and environment values.
    pub fn with_backend_url_override(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url {
            self.backend_url = normalize_backend_url(&url);
        }
        self
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<ClientSettings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => tracing::warn!(
                path = %path.display(),
                "ignoring unreadable settings file: {err}"
            ),
        }
    }

    if let Some(v) = env("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings.backend_url = normalize_backend_url(&settings.backend_url);
    settings
}

fn normalize_backend_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_BACKEND_URL.into();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
