use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::PreviewMode;

/// On-disk application configuration. Every field has a default so a missing
/// or partial file never blocks startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub layout: PreviewMode,
    /// Capability flag for the contacts popup, read once at startup.
    #[serde(default)]
    pub contacts_allowed: bool,
    /// Custom post-logout address; the root address when unset.
    #[serde(default)]
    pub logout_address: Option<String>,
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("driftmail")
        .join("config.json")
}

impl AppConfig {
    pub fn load_from(path: &Path) -> Result<Option<Self>, String> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path).map_err(|e| format!("read config: {e}"))?;
        let config = serde_json::from_str(&data).map_err(|e| format!("parse config: {e}"))?;
        Ok(Some(config))
    }

    /// Resolve the runtime config, falling back to defaults on any problem.
    pub fn load() -> Self {
        match Self::load_from(&config_path()) {
            Ok(Some(config)) => {
                log::info!("Config loaded from file");
                config
            }
            Ok(None) => {
                log::info!("No config file found, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Config file error, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
