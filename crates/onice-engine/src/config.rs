//! Job configuration
//!
//! Defaults, overlaid by an optional TOML file. The CLI applies flags and
//! environment variables on top.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use onice_core::errors::{ExError, ExErrorKind};
use onice_feed::http::DEFAULT_API_BASE;
use onice_feed::FeedConfig;
use onice_store::errors::{io_error, Result};
use serde::{Deserialize, Serialize};

use crate::reconstruct::{ReconstructOptions, DEFAULT_MAX_IN_FLIGHT};

pub const DEFAULT_DB_PATH: &str = ".onice/store.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Base URL of the live-feed API, without a trailing `/game/...`
    pub api_base: String,
    /// Per-request timeout for feed calls
    pub timeout_secs: u64,
    /// Cap on concurrent snapshot fetches per game
    pub max_in_flight: usize,
    pub db_path: PathBuf,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl JobConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("load_config")
                .with_message(e.to_string())
        })
    }

    /// Load from a TOML file; keys missing from the file keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| io_error("load_config", e))?;
        Self::from_toml_str(&content).map_err(|e| {
            let message = format!("{}: {}", path.display(), e.message());
            e.with_message(message)
        })
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            base_url: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..FeedConfig::default()
        }
    }

    pub fn reconstruct_options(&self) -> ReconstructOptions {
        ReconstructOptions {
            max_in_flight: self.max_in_flight.max(1),
        }
    }
}
