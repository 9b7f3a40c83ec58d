use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use arcade_core::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use arcade_core::Tuning;

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_SCORES_PATH: &str = "data/high-scores.json";

/// Host settings that come from the environment. CLI flags override them.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub fps: u32,
    pub scores_path: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            fps: DEFAULT_FPS,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self {
            viewport_width: read_env_f32("ARCADE_VIEWPORT_WIDTH", VIEWPORT_WIDTH),
            viewport_height: read_env_f32("ARCADE_VIEWPORT_HEIGHT", VIEWPORT_HEIGHT),
            fps: read_env_u32("ARCADE_FPS", DEFAULT_FPS),
            scores_path: read_env_path("ARCADE_SCORES_PATH", DEFAULT_SCORES_PATH),
        }
    }

    /// Default tuning for this host's viewport, overlaid with `tuning_file`
    /// when one is given. The result is validated.
    pub fn tuning(&self, tuning_file: Option<&Path>) -> Result<Tuning> {
        let base = Tuning::default().with_viewport(self.viewport_width, self.viewport_height);
        let tuning = match tuning_file {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed reading tuning file {}", path.display()))?;
                overlay_tuning(&base, &raw)
                    .with_context(|| format!("invalid tuning file {}", path.display()))?
            }
            None => base,
        };
        tuning.validate().context("tuning rejected")?;
        Ok(tuning)
    }
}

/// Applies the top-level keys of the JSON object `raw` on top of `base`.
/// Nested objects such as `viewport` replace the whole field.
pub fn overlay_tuning(base: &Tuning, raw: &str) -> Result<Tuning> {
    let overrides: serde_json::Value =
        serde_json::from_str(raw).context("tuning is not valid JSON")?;
    let serde_json::Value::Object(overrides) = overrides else {
        return Err(anyhow!("tuning must be a JSON object"));
    };

    let mut merged = serde_json::to_value(base).context("failed encoding base tuning")?;
    if let serde_json::Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            if !fields.contains_key(&key) {
                return Err(anyhow!("unknown tuning field '{key}'"));
            }
            fields.insert(key, value);
        }
    }
    serde_json::from_value(merged).context("tuning field has the wrong type")
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}

pub(crate) fn read_env_path(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
