use serde::Deserialize;

use super::{GuardConfig, DEFAULT_THRESHOLD};
use crate::error::{GuardError, Result};

/// On-disk guard config (`version: 1`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardFile {
    pub version: u32,

    #[serde(default)]
    pub guard: GuardSection,
}

impl GuardFile {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GuardError::UnsupportedVersion);
        }
        Ok(())
    }

    pub fn into_config(self) -> GuardConfig {
        GuardConfig {
            threshold: self.guard.threshold,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardSection {
    #[serde(default = "default_threshold")]
    pub threshold: i64,
}

impl Default for GuardSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> i64 {
    DEFAULT_THRESHOLD
}
