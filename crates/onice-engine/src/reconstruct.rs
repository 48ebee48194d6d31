//! Concurrent on-ice reconstruction
//!
//! One task per event: encode the timestamp, fetch the snapshot, canonicalize
//! away then home, and send both records to a shared completion channel.
//! Tasks wait on a semaphore before fetching, so at most `max_in_flight`
//! requests are outstanding.
//!
//! Tasks live in a `JoinSet`, so the first failure, or the caller dropping
//! the future, aborts every task still running. The failure is returned with
//! its `event_idx`. Records are self-describing, so arrival order does not
//! matter; the result is sorted by `(event_idx, team_id)` at the end.

#![allow(clippy::result_large_err)]

use std::collections::HashSet;
use std::sync::Arc;

use onice_core::errors::{ExError, ExErrorKind, OnIceError};
use onice_core::line::{canonicalize, Canonicalized, LineAnomaly};
use onice_core::model::{Event, OnIceRecord};
use onice_core::timecode;
use onice_feed::SnapshotSource;
use onice_store::errors::Result;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Default cap on concurrent snapshot fetches per game
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructOptions {
    /// Upper bound on concurrent snapshot fetches (values below 1 mean 1)
    pub max_in_flight: usize,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// A canonicalization anomaly tied to the record it was seen on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAnomaly {
    pub event_idx: i64,
    pub team_id: i64,
    pub anomaly: LineAnomaly,
}

/// All on-ice records for a game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    /// Exactly two per event, sorted by `(event_idx, team_id)`
    pub records: Vec<OnIceRecord>,
    pub anomalies: Vec<RecordAnomaly>,
}

type TaskOutput = Result<[Canonicalized; 2]>;

pub async fn reconstruct(
    source: Arc<dyn SnapshotSource>,
    game_pk: i64,
    events: &[Event],
    options: &ReconstructOptions,
) -> Result<Reconstruction> {
    if events.is_empty() {
        return Ok(Reconstruction::default());
    }
    reject_duplicate_event_idx(game_pk, events)?;

    let permits = options.max_in_flight.max(1);
    let semaphore = Arc::new(Semaphore::new(permits));
    let (tx, mut rx) = mpsc::channel::<TaskOutput>(permits);

    let mut tasks = JoinSet::new();
    for event in events {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();
        let event_idx = event.event_idx;
        let date_time = event.date_time.clone();

        tasks.spawn(async move {
            let output = reconstruct_event(source, semaphore, game_pk, event_idx, &date_time).await;
            // Receiver is gone only after a sibling failed
            let _ = tx.send(output).await;
        });
    }
    drop(tx);

    let expected = events.len();
    let mut records = Vec::with_capacity(expected * 2);
    let mut anomalies = Vec::new();

    for _ in 0..expected {
        match rx.recv().await {
            Some(Ok(pair)) => {
                for Canonicalized {
                    record,
                    anomalies: found,
                } in pair
                {
                    anomalies.extend(found.into_iter().map(|anomaly| RecordAnomaly {
                        event_idx: record.event_idx,
                        team_id: record.team_id,
                        anomaly,
                    }));
                    records.push(record);
                }
            }
            Some(Err(err)) => return Err(err),
            None => {
                return Err(ExError::new(ExErrorKind::Internal)
                    .with_op("reconstruct")
                    .with_game_pk(game_pk)
                    .with_message(format!(
                        "Completion channel closed after {} of {} events",
                        records.len() / 2,
                        expected
                    )));
            }
        }
    }

    records.sort_by_key(|r| (r.event_idx, r.team_id));

    for a in &anomalies {
        tracing::warn!(
            game_pk,
            event_idx = a.event_idx,
            team_id = a.team_id,
            anomaly = ?a.anomaly,
            "Line anomaly"
        );
    }

    Ok(Reconstruction { records, anomalies })
}

async fn reconstruct_event(
    source: Arc<dyn SnapshotSource>,
    semaphore: Arc<Semaphore>,
    game_pk: i64,
    event_idx: i64,
    date_time: &str,
) -> TaskOutput {
    let _permit = semaphore.acquire_owned().await.map_err(|e| {
        ExError::new(ExErrorKind::Concurrency)
            .with_op("reconstruct")
            .with_game_pk(game_pk)
            .with_event_idx(event_idx)
            .with_message(e.to_string())
    })?;

    let time_code = timecode::encode(date_time);
    let snapshot = source
        .fetch_snapshot(game_pk, &time_code)
        .await
        .map_err(|e| e.with_event_idx(event_idx))?;

    if snapshot.away.team_id == snapshot.home.team_id {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("reconstruct")
            .with_game_pk(game_pk)
            .with_event_idx(event_idx)
            .with_team_id(snapshot.away.team_id)
            .with_message("Snapshot lists the same team as away and home"));
    }

    Ok([
        canonicalize(game_pk, snapshot.away.team_id, event_idx, &snapshot.away.players),
        canonicalize(game_pk, snapshot.home.team_id, event_idx, &snapshot.home.players),
    ])
}

fn reject_duplicate_event_idx(game_pk: i64, events: &[Event]) -> Result<()> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(event.event_idx) {
            return Err(ExError::from(OnIceError::DuplicateEventIdx {
                game_pk,
                event_idx: event.event_idx,
            })
            .with_op("reconstruct"));
        }
    }
    Ok(())
}
