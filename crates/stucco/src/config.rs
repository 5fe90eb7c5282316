//! Configuration file loading for stucco.
//!
//! Reads `stucco.config.json` from the current working directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stucco_atelier_hmr::HmrOptions;
use stucco_atelier_macros::MacroOptions;

pub const CONFIG_FILE: &str = "stucco.config.json";

/// Top-level stucco configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StuccoConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Macro aliases, e.g. `{ "defineModel": { "alias": ["defineModel", "useModel"] } }`.
    #[serde(default)]
    pub macros: MacroOptions,

    /// HMR injection defaults for the `hmr` command.
    #[serde(default)]
    pub hmr: HmrOptions,
}

/// Load `stucco.config.json` from the given directory (or CWD if None).
pub fn load_config(dir: Option<&Path>) -> StuccoConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join(CONFIG_FILE);

    if !config_path.exists() {
        return StuccoConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %config_path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                StuccoConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            StuccoConfig::default()
        }
    }
}
