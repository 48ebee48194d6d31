use serde::{Deserialize, Serialize};

/// Game-level metadata stored alongside a game's play-by-play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_pk: i64,

    /// Season label as published by the feed, e.g. `"20222023"`
    pub season: String,

    /// Game type code (`R` regular season, `P` playoffs, ...)
    pub game_type: String,

    /// Scheduled start, as published by the feed
    pub start_time: String,

    pub away_team_id: i64,
    pub home_team_id: i64,
}

impl GameInfo {
    /// Numeric season, if the label is numeric
    ///
    /// Season line aggregation keys on this value.
    pub fn season_number(&self) -> Option<i64> {
        self.season.trim().parse().ok()
    }
}
