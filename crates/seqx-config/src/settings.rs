//! The persisted settings document.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Standard settings file name.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Environment variable overriding the settings file location.
pub const ENV_SETTINGS_PATH: &str = "SEQX_SETTINGS";

fn default_ip() -> String {
    "192.168.1.11".to_string()
}

fn default_eth_slot() -> u16 {
    1
}

fn default_cpu_slot() -> u16 {
    0
}

fn default_out_dir() -> String {
    "output".to_string()
}

fn default_chunk_size() -> usize {
    20
}

fn default_pretty_json() -> bool {
    true
}

/// Recognized settings keys with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Controller IP address.
    #[serde(default = "default_ip")]
    pub ip: String,

    /// Ethernet module slot.
    #[serde(default = "default_eth_slot")]
    pub eth_slot: u16,

    /// CPU module slot.
    #[serde(default = "default_cpu_slot")]
    pub cpu_slot: u16,

    /// Output directory for the archive and the diagnostic file, resolved
    /// relative to the settings file's directory.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Element addresses per bulk-read round trip.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Pretty-print (2-space indent) the exported JSON documents.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            eth_slot: default_eth_slot(),
            cpu_slot: default_cpu_slot(),
            out_dir: default_out_dir(),
            chunk_size: default_chunk_size(),
            pretty_json: default_pretty_json(),
        }
    }
}

/// Settings file location: `SEQX_SETTINGS` if set, otherwise next to the
/// executable, falling back to the current directory when the executable
/// path is unavailable.
pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = std::env::var(ENV_SETTINGS_PATH) {
        return PathBuf::from(path);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILENAME)
}

/// Load settings from `path`, healing the file as needed.
///
/// A missing, unreadable-as-JSON, non-object, or wrongly typed document is
/// replaced with defaults. A valid document missing recognized keys is
/// backfilled and persisted iff the merged result differs from what was
/// loaded; unrecognized keys survive the rewrite.
pub fn load_or_init(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "settings file missing, writing defaults");
        return reset_to_defaults(path);
    }

    let text = std::fs::read_to_string(path)?;
    let loaded: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), %err, "settings file unreadable, replacing with defaults");
            return reset_to_defaults(path);
        }
    };
    let Some(loaded_map) = loaded.as_object() else {
        warn!(path = %path.display(), "settings document is not an object, replacing with defaults");
        return reset_to_defaults(path);
    };

    // Defaults first, then the loaded document on top; unknown keys ride along.
    let mut merged = serde_json::to_value(Settings::default())?;
    let merged_map = merged.as_object_mut().expect("defaults serialize to an object");
    for (key, value) in loaded_map {
        merged_map.insert(key.clone(), value.clone());
    }

    let settings: Settings = match serde_json::from_value(merged.clone()) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(path = %path.display(), %err, "settings document has invalid values, replacing with defaults");
            return reset_to_defaults(path);
        }
    };

    if merged != loaded {
        debug!(path = %path.display(), "backfilling missing settings keys");
        write_document(path, &merged)?;
    }
    Ok(settings)
}

fn reset_to_defaults(path: &Path) -> Result<Settings, ConfigError> {
    let defaults = Settings::default();
    write_document(path, &serde_json::to_value(&defaults)?)?;
    Ok(defaults)
}

fn write_document(path: &Path, document: &Value) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    std::fs::write(path, text)?;
    Ok(())
}
