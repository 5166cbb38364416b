// Judge configuration for Arbiter Worker
use anyhow::{bail, Context, Result};
use arbiter_common::Comparison;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

pub const ENV_TIMEOUT_MS: &str = "ARBITER_TIMEOUT_MS";
pub const ENV_COMPARISON: &str = "ARBITER_COMPARISON";

/// Per-run judge settings
///
/// Layers, lowest precedence first: defaults, config file, environment, CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Wall-clock budget for one candidate invocation
    pub timeout_ms: u64,
    pub comparison: Comparison,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            comparison: Comparison::Exact,
        }
    }
}

impl JudgeConfig {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            bail!("Judge config file not found: {}", config_path.display());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: JudgeConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Overlay `ARBITER_TIMEOUT_MS` / `ARBITER_COMPARISON` from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be an integer, got '{}'", ENV_TIMEOUT_MS, raw))?;
        }

        if let Some(raw) = lookup(ENV_COMPARISON) {
            self.comparison = match Comparison::from_name(raw.trim()) {
                Some(mode) => mode,
                None => bail!("{} must be EXACT or UNORDERED, got '{}'", ENV_COMPARISON, raw),
            };
        }

        Ok(self)
    }

    pub fn with_overrides(mut self, timeout_ms: Option<u64>, comparison: Option<Comparison>) -> Self {
        if let Some(timeout_ms) = timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(comparison) = comparison {
            self.comparison = comparison;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
