//! onice engine - orchestration layer
//!
//! Coordinates the feed, the pure core and the store:
//! - [`reconstruct`] fans out one snapshot fetch per event under a bounded
//!   number of in-flight requests and fans the records back in
//! - [`job::process_game`] runs one game end to end against the ETL ledger
//! - [`config::JobConfig`] carries the tunables

pub mod config;
pub mod job;
pub mod reconstruct;

pub use config::JobConfig;
pub use job::{parse_game_id, process_game, JobOptions, JobOutcome};
pub use reconstruct::{reconstruct, Reconstruction, RecordAnomaly, ReconstructOptions};
