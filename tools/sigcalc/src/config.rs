//! sigcalc configuration
//!
//! Loaded from `config/sigcalc.{toml,yaml,json}`, an optional `--config`
//! file and `SIGCALC_*` environment variables, in increasing priority.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sigfig_calc::RoundingTarget;
use std::path::Path;

pub const APP_NAME: &str = "sigcalc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigcalcConfig {
    /// Rounding target applied when none is given on the command line
    pub rounding: RoundingTarget,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log as JSON lines instead of the bracketed format
    pub log_json: bool,
    /// Colored output
    pub color: bool,
    /// REPL prompt prefix
    pub prompt: String,
}

impl Default for SigcalcConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingTarget::Off,
            log_level: "warn".to_string(),
            log_json: false,
            color: true,
            prompt: APP_NAME.to_string(),
        }
    }
}

/// Load configuration with an optional explicit file
pub fn load(file: Option<&Path>) -> Result<SigcalcConfig> {
    common::config::load_config(APP_NAME, file).context("Failed to load sigcalc configuration")
}
