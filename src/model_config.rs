use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::persist::app_cache_dir;

/// Relative weight of each statistical discipline in the overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub batting: f64,
    pub bowling: f64,
    pub fielding: f64,
    pub mvp: f64,
}

/// Tunables of the rating and prediction model. The defaults are the
/// league's production constants; a cached JSON file or env override can
/// swap them without touching pipeline code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Blend coefficient favoring the more recent season.
    pub recency_weight: f64,
    pub component_weights: ComponentWeights,
    /// Temperature dividing the rating gap before the logistic transform.
    pub probability_scale: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            recency_weight: 0.68,
            component_weights: ComponentWeights {
                batting: 0.40,
                bowling: 0.40,
                fielding: 0.10,
                mvp: 0.10,
            },
            probability_scale: 3.2,
        }
    }
}

/// Load the model config, preferring `MODEL_CONFIG_PATH`, then the cached
/// copy in the app cache dir, then the built-in defaults. Unreadable or
/// malformed files fall through silently; tuning files are optional.
pub fn load_model_config() -> ModelConfig {
    if let Some(path) = config_path_override()
        && let Some(cfg) = read_config_file(&path)
    {
        return cfg;
    }
    if let Some(path) = cached_config_path()
        && let Some(cfg) = read_config_file(&path)
    {
        return cfg;
    }
    ModelConfig::default()
}

/// Persist the active config to the app cache dir so later runs start
/// from the same tuning. A machine without a resolvable cache dir is a
/// no-op, not an error.
pub fn save_cached_config(cfg: &ModelConfig) -> Result<()> {
    let Some(path) = cached_config_path() else {
        return Ok(());
    };
    write_config_file(&path, cfg)
}

/// Write via a temp file in the same directory, then rename over the
/// target, so a crash mid-write never leaves a truncated config behind.
fn write_config_file(path: &Path, cfg: &ModelConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(cfg).context("serialize model config")?;
    fs::write(&tmp, json).context("write model config")?;
    fs::rename(&tmp, path).context("swap model config")?;
    Ok(())
}

fn read_config_file(path: &Path) -> Option<ModelConfig> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<ModelConfig>(&raw).ok()
}

fn config_path_override() -> Option<PathBuf> {
    env::var("MODEL_CONFIG_PATH")
        .ok()
        .map(|s| PathBuf::from(s.trim()))
        .filter(|p| p.exists())
}

fn cached_config_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join("model_config.json"))
}
