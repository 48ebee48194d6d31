//! onice store - SQLite persistence
//!
//! Provides:
//! - Connection helpers and embedded, checksummed migrations
//! - Repositories for games, play-by-play, on-ice records and season lines
//! - The ETL status ledger
//! - `persist_game`, the single-transaction write of a reconstructed game

pub mod db;
pub mod errors;
pub mod ledger;
pub mod migrations;
pub mod persist;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use persist::{persist_game, GamePayload, PersistSummary};
