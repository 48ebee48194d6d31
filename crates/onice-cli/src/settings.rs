//! Global flags and config resolution
//!
//! Precedence, lowest first: built-in defaults, `--config` TOML file,
//! environment variables, command-line flags.

use std::path::PathBuf;

use clap::Args;
use onice_core::logging_facility::Profile;
use onice_engine::JobConfig;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML config file
    #[arg(long, global = true, env = "ONICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite store path [default: .onice/store.db]
    #[arg(long, global = true, env = "ONICE_DB")]
    pub db: Option<PathBuf>,

    /// Live-feed API base URL
    #[arg(long, global = true, env = "ONICE_API_BASE")]
    pub api_base: Option<String>,

    /// Maximum concurrent snapshot fetches per game
    #[arg(long, global = true, env = "ONICE_MAX_IN_FLIGHT")]
    pub max_in_flight: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "ONICE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log output: pretty or json
    #[arg(long, global = true, env = "ONICE_LOG_FORMAT")]
    pub log_format: Option<Profile>,
}

pub fn resolve(args: &GlobalArgs) -> Result<JobConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => JobConfig::load(path)?,
        None => JobConfig::default(),
    };

    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(api_base) = &args.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(max_in_flight) = args.max_in_flight {
        config.max_in_flight = max_in_flight;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    tracing::debug!(?config, "Resolved job config");
    Ok(config)
}
