//! Start-up settings, read once from an optional JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::spectrum::{GridSpec, ModelPreset, SpectrumModelConfig};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "DBST_LAB_CONFIG";
/// File looked up in the working directory when the variable is unset.
pub const CONFIG_FILE: &str = "dbst-lab.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabSettings {
    pub grid: GridSpec,
    /// Preset used when `model` is absent.
    pub preset: Option<ModelPreset>,
    pub model: Option<SpectrumModelConfig>,
    /// Upper bound of the concentration sliders (µM).
    pub max_concentration: f64,
    /// Concentration given to a newly added sample (µM).
    pub default_concentration: f64,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            preset: Some(ModelPreset::Localized),
            model: None,
            max_concentration: 10.0,
            default_concentration: 1.0,
        }
    }
}

impl LabSettings {
    /// Model configuration the simulator starts with.
    pub fn model_config(&self) -> SpectrumModelConfig {
        self.model
            .or_else(|| self.preset.map(ModelPreset::config))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: LabSettings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    /// Settings from `$DBST_LAB_CONFIG`, else `./dbst-lab.json`, else defaults.
    ///
    /// A file that cannot be read or parsed is logged and ignored.
    pub fn load() -> Self {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    log::debug!("no {CONFIG_FILE}, using built-in settings");
                    return Self::default();
                }
                local
            }
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }
}
