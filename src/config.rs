use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::queue::Backend;
use crate::synth;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub synth: SynthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Capacity used by `ringq exec` when --capacity is not given
    pub default_capacity: usize,
    /// Queue backend used by `ringq exec`: "array" or "linked"
    pub backend: Backend,
    /// Print JSON instead of text unless overridden on the command line
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Output samples per second
    pub sample_rate: u32,
    /// Energy decay factor applied on every tic, within [0, 1]
    pub decay: f64,
    /// Fixed RNG seed for reproducible plucks; None = random
    pub seed: Option<u64>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { default_capacity: 16, backend: Backend::Array, json: false }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self { sample_rate: synth::SAMPLE_RATE, decay: synth::DECAY, seed: None }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Loads the user config, writing defaults on first run. Any failure
    /// falls back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(err) if path.exists() => {
                tracing::warn!(path = %path.display(), "ignoring config, using defaults: {err:#}");
                Config::default()
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), "no config yet: {err:#}");
                // Best-effort; a read-only config dir is not an error.
                let _ = write_defaults(&path);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.default_capacity == 0 {
            anyhow::bail!("general.default_capacity must be at least 1");
        }
        if self.synth.sample_rate == 0 {
            anyhow::bail!("synth.sample_rate must be positive");
        }
        if !(0.0..=1.0).contains(&self.synth.decay) {
            anyhow::bail!("synth.decay must be within [0, 1], got {}", self.synth.decay);
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ringq").join("ringq.toml"))
    }
}

pub fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# ringq configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
