//! onice feed - remote live-feed access
//!
//! Provides:
//! - Wire models for the live game feed and their mapping onto core types
//! - The [`SnapshotSource`] seam the engine fetches through
//! - [`HttpSnapshotSource`], the reqwest-backed implementation

pub mod errors;
pub mod http;
pub mod source;
pub mod wire;

pub use errors::Result;
pub use http::{FeedConfig, HttpSnapshotSource};
pub use source::{GameFeed, GameSnapshot, SnapshotSource};
