//! Single-transaction write of a reconstructed game
//!
//! Everything for one game lands together or not at all: per-game rows are
//! replaced, on-ice records and season lines are upserted and the ledger is
//! marked `COMPLETE` before the commit.

#![allow(clippy::result_large_err)]

use std::collections::HashSet;

use crate::errors::{from_rusqlite, Result};
use crate::ledger;
use crate::repo::{GameRepo, LineRepo, OnIceRepo, SkaterLine};
use onice_core::errors::{ExError, ExErrorKind};
use onice_core::model::{Event, GameInfo, GameStatus, OnIceRecord};
use rusqlite::Connection;
use serde::Serialize;

/// Everything written for one game
#[derive(Debug, Clone)]
pub struct GamePayload {
    pub game: GameInfo,
    pub events: Vec<Event>,
    pub records: Vec<OnIceRecord>,
}

/// Row counts written by `persist_game`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersistSummary {
    pub game_pk: i64,
    pub plays: usize,
    pub contributors: usize,
    pub on_ice_records: usize,
    pub skater_lines: usize,
}

pub fn persist_game(conn: &mut Connection, payload: &GamePayload) -> Result<PersistSummary> {
    let game_pk = payload.game.game_pk;
    validate(payload)?;

    let season = payload.game.season_number().ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("persist_game")
            .with_game_pk(game_pk)
            .with_message(format!("Season is not numeric: {:?}", payload.game.season))
    })?;
    let lines = SkaterLine::from_records(season, &payload.records);
    let now = chrono::Utc::now().timestamp();

    let tx = conn.transaction().map_err(from_rusqlite)?;

    GameRepo::delete_game_rows(&tx, game_pk)?;
    GameRepo::insert_game(&tx, &payload.game, now)?;
    let (plays, contributors) = GameRepo::insert_plays(&tx, game_pk, &payload.events, now)?;
    let on_ice_records = OnIceRepo::upsert_on_ice(&tx, &payload.records, now)?;
    let skater_lines = LineRepo::upsert_skater_lines(&tx, &lines, now)?;
    ledger::set_status(&tx, game_pk, GameStatus::Complete)?;

    tx.commit()
        .map_err(|e| from_rusqlite(e).with_op("persist_game").with_game_pk(game_pk))?;

    tracing::debug!(
        game_pk,
        plays,
        contributors,
        on_ice_records,
        skater_lines,
        "Persisted game"
    );

    Ok(PersistSummary {
        game_pk,
        plays,
        contributors,
        on_ice_records,
        skater_lines,
    })
}

fn validate(payload: &GamePayload) -> Result<()> {
    let game_pk = payload.game.game_pk;
    if let Some(stray) = payload.records.iter().find(|r| r.game_pk != game_pk) {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("persist_game")
            .with_game_pk(game_pk)
            .with_event_idx(stray.event_idx)
            .with_team_id(stray.team_id)
            .with_message(format!(
                "On-ice record belongs to game {}",
                stray.game_pk
            )));
    }

    let mut keys = HashSet::with_capacity(payload.records.len());
    if let Some(dup) = payload
        .records
        .iter()
        .find(|r| !keys.insert((r.team_id, r.event_idx)))
    {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("persist_game")
            .with_game_pk(game_pk)
            .with_event_idx(dup.event_idx)
            .with_team_id(dup.team_id)
            .with_message("Duplicate on-ice record for team and event"));
    }
    Ok(())
}
