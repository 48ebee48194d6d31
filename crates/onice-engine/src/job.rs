//! Per-game job
//!
//! ## Pipeline (in order):
//! 1. Ledger check: a `COMPLETE` game is skipped without fetching
//! 2. Ledger write `IN_PROGRESS`
//! 3. Fetch the game feed
//! 4. Reconstruct on-ice records for every event
//! 5. Persist everything in one transaction, which also writes `COMPLETE`
//!
//! A failure anywhere leaves the game non-`COMPLETE`; re-running the job
//! with the same id is the recovery path.

#![allow(clippy::result_large_err)]

use std::sync::Arc;

use onice_core::errors::{ExError, ExErrorKind, OnIceError};
use onice_core::model::GameStatus;
use onice_core::{log_op_end, log_op_error, log_op_start};
use onice_core_types::RunContext;
use onice_feed::SnapshotSource;
use onice_store::errors::Result;
use onice_store::{ledger, persist_game, GamePayload, PersistSummary};
use rusqlite::Connection;

use crate::reconstruct::{reconstruct, ReconstructOptions, RecordAnomaly};

#[derive(Debug, Clone, Default)]
pub struct JobOptions {
    pub reconstruct: ReconstructOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The ledger already had the game as `COMPLETE`; nothing was fetched or written
    AlreadyComplete,
    Processed {
        summary: PersistSummary,
        anomalies: Vec<RecordAnomaly>,
    },
}

/// Parse the trigger message into a game id
///
/// The message is an opaque decimal id, optionally surrounded by whitespace.
pub fn parse_game_id(message: &str) -> Result<i64> {
    let trimmed = message.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            OnIceError::InvalidGameId {
                input: message.to_string(),
            }
            .into()
        })
}

pub async fn process_game(
    conn: &mut Connection,
    source: Arc<dyn SnapshotSource>,
    game_pk: i64,
    options: &JobOptions,
) -> Result<JobOutcome> {
    let ctx = RunContext::new(game_pk);
    log_op_start!("process_game", game_pk = game_pk, run_id = %ctx.run_id);
    let start = std::time::Instant::now();

    let outcome = process_game_impl(conn, source, game_pk, options)
        .await
        .map_err(|e| {
            let e = e.with_run_id(ctx.run_id.clone());
            log_op_error!(
                "process_game",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                game_pk = game_pk
            );
            e
        })?;

    match &outcome {
        JobOutcome::AlreadyComplete => {
            log_op_end!(
                "process_game",
                duration_ms = start.elapsed().as_millis() as u64,
                game_pk = game_pk,
                skipped = true
            );
        }
        JobOutcome::Processed { summary, anomalies } => {
            log_op_end!(
                "process_game",
                duration_ms = start.elapsed().as_millis() as u64,
                game_pk = game_pk,
                event_count = summary.plays,
                record_count = summary.on_ice_records,
                anomaly_count = anomalies.len()
            );
        }
    }

    Ok(outcome)
}

async fn process_game_impl(
    conn: &mut Connection,
    source: Arc<dyn SnapshotSource>,
    game_pk: i64,
    options: &JobOptions,
) -> Result<JobOutcome> {
    if ledger::get_status(conn, game_pk)?.is_complete() {
        tracing::info!(game_pk, "Game already complete, skipping");
        return Ok(JobOutcome::AlreadyComplete);
    }

    ledger::set_status(conn, game_pk, GameStatus::InProgress)?;

    let feed = source.fetch_game(game_pk).await?;
    if feed.game.game_pk != game_pk {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("fetch_game")
            .with_game_pk(game_pk)
            .with_message(format!("Feed returned game {}", feed.game.game_pk)));
    }
    tracing::debug!(game_pk, event_count = feed.events.len(), "Fetched game feed");

    let reconstruction = reconstruct(source, game_pk, &feed.events, &options.reconstruct).await?;

    let teams = [feed.game.away_team_id, feed.game.home_team_id];
    if let Some(stray) = reconstruction
        .records
        .iter()
        .find(|r| !teams.contains(&r.team_id))
    {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("reconstruct")
            .with_game_pk(game_pk)
            .with_event_idx(stray.event_idx)
            .with_team_id(stray.team_id)
            .with_message(format!(
                "Snapshot team is not one of the game's teams {:?}",
                teams
            )));
    }

    let payload = GamePayload {
        game: feed.game,
        events: feed.events,
        records: reconstruction.records,
    };
    let summary = persist_game(conn, &payload)?;

    Ok(JobOutcome::Processed {
        summary,
        anomalies: reconstruction.anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_id() {
        assert_eq!(parse_game_id("2022020287").unwrap(), 2022020287);
        assert_eq!(parse_game_id("  2022020287\n").unwrap(), 2022020287);
    }

    #[test]
    fn test_parse_game_id_rejects_garbage() {
        for input in ["", "abc", "12a", "-5", "0", "{\"gamePk\": 1}"] {
            let err = parse_game_id(input).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidInput, "input {:?}", input);
        }
    }
}
