//! The fetch seam between the engine and the remote feed

use async_trait::async_trait;
use onice_core::model::{Event, GameInfo, TeamOnIce};
use onice_core::timecode::TimeCode;

use crate::errors::Result;

/// Both teams' on-ice players at one moment of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub away: TeamOnIce,
    pub home: TeamOnIce,
}

/// A game's metadata and full play-by-play
#[derive(Debug, Clone, PartialEq)]
pub struct GameFeed {
    pub game: GameInfo,
    pub events: Vec<Event>,
}

/// Source of game feeds and time-coded snapshots
///
/// Implementations must not retry: a failed snapshot is reported as-is and
/// the whole game is re-run later from the ledger.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current full feed for a game
    async fn fetch_game(&self, game_pk: i64) -> Result<GameFeed>;

    /// Fetch the state of a game as of `time_code`
    async fn fetch_snapshot(&self, game_pk: i64, time_code: &TimeCode) -> Result<GameSnapshot>;
}
