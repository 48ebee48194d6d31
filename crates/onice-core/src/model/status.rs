use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::OnIceError;

/// Processing status of a game in the ETL ledger
///
/// A game with no ledger row is `Pending`. Only `Complete` stops a game from
/// being processed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Pending,
    InProgress,
    Complete,
}

impl GameStatus {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Pending => "PENDING",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Complete => "COMPLETE",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, GameStatus::Complete)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = OnIceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(GameStatus::Pending),
            "IN_PROGRESS" => Ok(GameStatus::InProgress),
            "COMPLETE" => Ok(GameStatus::Complete),
            other => Err(OnIceError::UnknownGameStatus {
                value: other.to_string(),
            }),
        }
    }
}
