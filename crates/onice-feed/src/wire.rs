//! Wire models for the live game feed
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! payload is ignored. Missing optional sections decode to their defaults so
//! early-game and pre-game payloads still parse.

use onice_core::model::{
    Contributor, Coordinates, Event, EventResult, GameInfo, OnIcePlayer, Score, TeamOnIce,
};
use serde::Deserialize;

use crate::errors::{decode_error, Result};
use crate::source::{GameFeed, GameSnapshot};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_data: GameData,
    pub live_data: LiveData,
}

#[derive(Debug, Deserialize)]
pub struct GameData {
    pub game: GameHeader,
    #[serde(default)]
    pub datetime: GameDateTime,
    pub teams: GameTeams,
}

#[derive(Debug, Deserialize)]
pub struct GameHeader {
    pub pk: i64,
    #[serde(default)]
    pub season: String,
    #[serde(rename = "type", default)]
    pub game_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDateTime {
    #[serde(default)]
    pub date_time: String,
}

#[derive(Debug, Deserialize)]
pub struct GameTeams {
    pub away: TeamRef,
    pub home: TeamRef,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TeamRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LiveData {
    #[serde(default)]
    pub plays: Plays,
    pub boxscore: Boxscore,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plays {
    #[serde(default)]
    pub all_plays: Vec<Play>,
}

#[derive(Debug, Deserialize)]
pub struct Boxscore {
    pub teams: BoxscoreTeams,
}

#[derive(Debug, Deserialize)]
pub struct BoxscoreTeams {
    pub away: BoxscoreTeam,
    pub home: BoxscoreTeam,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    pub team: TeamRef,
    #[serde(default)]
    pub goalies: Vec<i64>,
    #[serde(default)]
    pub on_ice_plus: Vec<OnIcePlusPlayer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnIcePlusPlayer {
    pub player_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Play {
    #[serde(default)]
    pub players: Vec<PlayPlayer>,
    #[serde(default)]
    pub result: PlayResult,
    pub about: About,
    #[serde(default)]
    pub coordinates: PlayCoordinates,
    pub team: Option<TeamRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayPlayer {
    pub player: PlayerRef,
    #[serde(default)]
    pub player_type: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRef {
    pub id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub event_code: String,
    #[serde(default)]
    pub event_type_id: String,
    #[serde(default)]
    pub description: String,
    pub secondary_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub event_idx: i64,
    #[serde(default)]
    pub event_id: i64,
    #[serde(default)]
    pub period: i64,
    #[serde(default)]
    pub period_type: String,
    #[serde(default)]
    pub period_time: String,
    pub date_time: String,
    #[serde(default)]
    pub goals: Goals,
}

#[derive(Debug, Default, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub away: i64,
    #[serde(default)]
    pub home: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayCoordinates {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl BoxscoreTeam {
    /// On-ice players in feed order, flagged as goalie when listed in `goalies`
    pub fn on_ice(&self) -> TeamOnIce {
        TeamOnIce {
            team_id: self.team.id,
            players: self
                .on_ice_plus
                .iter()
                .map(|p| OnIcePlayer {
                    player_id: p.player_id,
                    is_goalie: self.goalies.contains(&p.player_id),
                })
                .collect(),
        }
    }
}

impl From<Play> for Event {
    fn from(play: Play) -> Self {
        let coordinates = match (play.coordinates.x, play.coordinates.y) {
            (Some(x), Some(y)) => Some(Coordinates { x, y }),
            _ => None,
        };
        Event {
            event_idx: play.about.event_idx,
            event_id: play.about.event_id,
            date_time: play.about.date_time,
            period: play.about.period,
            period_type: play.about.period_type,
            period_time: play.about.period_time,
            goals: Score {
                away: play.about.goals.away,
                home: play.about.goals.home,
            },
            result: EventResult {
                event: play.result.event,
                event_code: play.result.event_code,
                event_type_id: play.result.event_type_id,
                description: play.result.description,
                secondary_type: play.result.secondary_type,
            },
            coordinates,
            team_id: play.team.map(|t| t.id),
            contributors: play
                .players
                .into_iter()
                .map(|p| Contributor {
                    player_id: p.player.id,
                    player_type: p.player_type,
                })
                .collect(),
        }
    }
}

impl GameResponse {
    pub fn game_info(&self) -> GameInfo {
        GameInfo {
            game_pk: self.game_data.game.pk,
            season: self.game_data.game.season.clone(),
            game_type: self.game_data.game.game_type.clone(),
            start_time: self.game_data.datetime.date_time.clone(),
            away_team_id: self.game_data.teams.away.id,
            home_team_id: self.game_data.teams.home.id,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            away: self.live_data.boxscore.teams.away.on_ice(),
            home: self.live_data.boxscore.teams.home.on_ice(),
        }
    }

    pub fn into_game_feed(self) -> GameFeed {
        let game = self.game_info();
        GameFeed {
            game,
            events: self
                .live_data
                .plays
                .all_plays
                .into_iter()
                .map(Event::from)
                .collect(),
        }
    }
}

/// Decode a full live-feed payload
pub fn decode_game(bytes: &[u8]) -> Result<GameFeed> {
    let response: GameResponse =
        serde_json::from_slice(bytes).map_err(|e| decode_error("decode_game", e))?;
    Ok(response.into_game_feed())
}

/// Decode a time-coded payload down to the two on-ice rosters
pub fn decode_snapshot(bytes: &[u8]) -> Result<GameSnapshot> {
    let response: GameResponse =
        serde_json::from_slice(bytes).map_err(|e| decode_error("decode_snapshot", e))?;
    Ok(response.snapshot())
}
