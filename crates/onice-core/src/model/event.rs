use serde::{Deserialize, Serialize};

/// One play from a game's play-by-play feed
///
/// `event_idx` is unique within a game and increases monotonically; it is the
/// key every on-ice record hangs off. Everything else is carried through to
/// the play-by-play tables unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_idx: i64,
    pub event_id: i64,

    /// Wall-clock timestamp (ISO-8601, usually UTC with a `Z` suffix)
    pub date_time: String,

    pub period: i64,
    pub period_type: String,
    pub period_time: String,

    /// Score at the time of the event
    pub goals: Score,

    pub result: EventResult,
    pub coordinates: Option<Coordinates>,

    /// Team credited with the play, when there is one
    pub team_id: Option<i64>,

    pub contributors: Vec<Contributor>,
}

impl Event {
    /// Minimal event carrying only the fields reconstruction needs
    pub fn new(event_idx: i64, date_time: impl Into<String>) -> Self {
        Self {
            event_idx,
            event_id: event_idx,
            date_time: date_time.into(),
            period: 0,
            period_type: String::new(),
            period_time: String::new(),
            goals: Score::default(),
            result: EventResult::default(),
            coordinates: None,
            team_id: None,
            contributors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub away: i64,
    pub home: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResult {
    pub event: String,
    pub event_code: String,
    pub event_type_id: String,
    pub description: String,
    pub secondary_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// A player credited on a play (shooter, hitter, assist, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub player_id: i64,
    pub player_type: String,
}
