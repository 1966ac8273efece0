use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "quickbite.toml";
/// Upper bound for the session event buffer.
pub const MAX_EVENT_CAPACITY: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionSettings {
    pub splash_delay_ms: u64,
    pub event_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            splash_delay_ms: 2000,
            event_capacity: 64,
        }
    }
}

impl SessionSettings {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }
}

/// Defaults, then `quickbite.toml` in the working directory, then environment.
pub fn load_settings() -> SessionSettings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> SessionSettings {
    let mut settings = SessionSettings::default();

    match read_settings_file(path) {
        Ok(Some(file_cfg)) => apply_file_overrides(&mut settings, &file_cfg),
        Ok(None) => {}
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable settings file");
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<HashMap<String, toml::Value>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    let parsed = toml::from_str::<HashMap<String, toml::Value>>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_overrides(settings: &mut SessionSettings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("splash_delay_ms").and_then(toml::Value::as_integer) {
        if let Ok(v) = u64::try_from(v) {
            settings.splash_delay_ms = v;
        }
    }
    if let Some(v) = file_cfg.get("event_capacity").and_then(toml::Value::as_integer) {
        if let Ok(v) = usize::try_from(v) {
            settings.event_capacity = v.clamp(1, MAX_EVENT_CAPACITY);
        }
    }
}

fn apply_env_overrides(settings: &mut SessionSettings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["QUICKBITE_SPLASH_DELAY_MS", "APP__SPLASH_DELAY_MS"] {
        if let Some(v) = lookup(key).and_then(|v| v.trim().parse::<u64>().ok()) {
            settings.splash_delay_ms = v;
        }
    }

    if let Some(v) = lookup("APP__EVENT_CAPACITY").and_then(|v| v.trim().parse::<usize>().ok()) {
        settings.event_capacity = v.clamp(1, MAX_EVENT_CAPACITY);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
