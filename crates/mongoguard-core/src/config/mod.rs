//! Guard configuration: option values plus a strict YAML loader.
//!
//! A `GuardConfig` starts from its default and has zero or more `GuardOption`s
//! applied in order. It is copied into the session at construction and never
//! changes afterwards.

pub mod schema;

use std::fs;

use crate::error::{GuardError, Result};

pub use schema::{GuardFile, GuardSection};

/// Threshold used when no option overrides it.
pub const DEFAULT_THRESHOLD: i64 = 100;

/// Tunable guard parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    /// Inclusive upper bound on `executionStats.totalDocsExamined`.
    /// Zero or negative values reject every query.
    pub threshold: i64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl GuardConfig {
    /// Default config with `opts` applied in order.
    pub fn with_options<I>(opts: I) -> Self
    where
        I: IntoIterator<Item = GuardOption>,
    {
        opts.into_iter().fold(Self::default(), |cfg, opt| opt.apply(cfg))
    }

    /// Named setter for the threshold.
    pub fn threshold(self, threshold: i64) -> Self {
        Self { threshold, ..self }
    }
}

/// One configuration option; each variant sets exactly one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOption {
    Threshold(i64),
}

impl GuardOption {
    pub fn apply(self, cfg: GuardConfig) -> GuardConfig {
        match self {
            GuardOption::Threshold(n) => cfg.threshold(n),
        }
    }
}

/// Set the maximum tolerated examined-document count.
pub fn with_threshold(n: i64) -> GuardOption {
    GuardOption::Threshold(n)
}

pub fn load_from_file(path: &str) -> Result<GuardConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GuardError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GuardConfig> {
    let file: GuardFile = serde_yaml::from_str(s)
        .map_err(|e| GuardError::Config(format!("invalid yaml: {e}")))?;
    file.validate()?;
    let cfg = file.into_config();
    tracing::debug!(threshold = cfg.threshold, "guard config loaded");
    Ok(cfg)
}
