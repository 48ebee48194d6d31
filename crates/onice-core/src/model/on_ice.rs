use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of skater slots on an on-ice record
pub const SKATER_SLOTS: usize = 6;

/// A player listed on the ice in a game snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OnIcePlayer {
    pub player_id: i64,
    pub is_goalie: bool,
}

impl OnIcePlayer {
    pub fn skater(player_id: i64) -> Self {
        Self {
            player_id,
            is_goalie: false,
        }
    }

    pub fn goalie(player_id: i64) -> Self {
        Self {
            player_id,
            is_goalie: true,
        }
    }
}

/// One team's on-ice players at a point in time, in snapshot order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOnIce {
    pub team_id: i64,
    pub players: Vec<OnIcePlayer>,
}

/// Canonical identity of a skater combination (lowercase hex digest)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineHash(String);

impl LineHash {
    /// Wrap a digest read back from storage
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who was on the ice for one team at one event
///
/// Exactly one record exists per `(game_pk, team_id, event_idx)`. Skater
/// slots hold distinct ids in ascending order; unfilled slots are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnIceRecord {
    pub game_pk: i64,
    pub team_id: i64,
    pub event_idx: i64,
    pub line_hash: LineHash,
    pub goalie_id: Option<i64>,
    pub skaters: [Option<i64>; SKATER_SLOTS],
}

impl OnIceRecord {
    /// Storage key
    pub fn key(&self) -> (i64, i64, i64) {
        (self.game_pk, self.team_id, self.event_idx)
    }

    /// Skater in slot `n` (1-based, matching the `skater_id_N` columns)
    pub fn skater(&self, n: usize) -> Option<i64> {
        n.checked_sub(1)
            .and_then(|i| self.skaters.get(i))
            .copied()
            .flatten()
    }

    /// Filled skater slots in ascending order
    pub fn skater_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.skaters.iter().filter_map(|s| *s)
    }

    pub fn skater_count(&self) -> usize {
        self.skater_ids().count()
    }
}
