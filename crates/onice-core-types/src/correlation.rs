//! Run correlation
//!
//! A single ETL invocation processes exactly one game. The `RunId` is
//! attached to every error that leaves the job, so a failure can be tied
//! back to the invocation that produced it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one job invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new RunId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one game's processing
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    pub game_pk: i64,
}

impl RunContext {
    /// Create a context for a game with a fresh RunId
    pub fn new(game_pk: i64) -> Self {
        Self {
            run_id: RunId::new(),
            game_pk,
        }
    }
}
