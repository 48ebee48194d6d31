//! `play_by_play_on_ice` rows

#![allow(clippy::result_large_err)]

use crate::errors::{sql_error, Result};
use onice_core::model::{LineHash, OnIceRecord, SKATER_SLOTS};
use rusqlite::{params, Connection, Row, Transaction};

pub struct OnIceRepo;

impl OnIceRepo {
    /// Upsert on-ice records keyed by `(game_pk, team_id, event_idx)`
    ///
    /// A conflicting row keeps its content; only `updated_at` moves.
    pub fn upsert_on_ice(tx: &Transaction, records: &[OnIceRecord], now: i64) -> Result<usize> {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO play_by_play_on_ice (
                    game_pk, team_id, event_idx, line_hash, goalie_id,
                    skater_id_1, skater_id_2, skater_id_3, skater_id_4, skater_id_5, skater_id_6,
                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
                 ON CONFLICT(game_pk, team_id, event_idx) DO UPDATE SET
                    updated_at = excluded.updated_at",
            )
            .map_err(|e| sql_error("upsert_on_ice", e))?;

        for record in records {
            let [s1, s2, s3, s4, s5, s6] = record.skaters;
            stmt.execute(params![
                record.game_pk,
                record.team_id,
                record.event_idx,
                record.line_hash.as_str(),
                record.goalie_id,
                s1,
                s2,
                s3,
                s4,
                s5,
                s6,
                now,
            ])
            .map_err(|e| {
                sql_error("upsert_on_ice", e)
                    .with_game_pk(record.game_pk)
                    .with_event_idx(record.event_idx)
                    .with_team_id(record.team_id)
            })?;
        }

        Ok(records.len())
    }

    /// All on-ice records for a game, ordered by `(event_idx, team_id)`
    pub fn list_on_ice(conn: &Connection, game_pk: i64) -> Result<Vec<OnIceRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT game_pk, team_id, event_idx, line_hash, goalie_id,
                        skater_id_1, skater_id_2, skater_id_3, skater_id_4, skater_id_5, skater_id_6
                 FROM play_by_play_on_ice
                 WHERE game_pk = ?1
                 ORDER BY event_idx, team_id",
            )
            .map_err(|e| sql_error("list_on_ice", e))?;

        let records = stmt
            .query_map(params![game_pk], row_to_record)
            .map_err(|e| sql_error("list_on_ice", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| sql_error("list_on_ice", e))?;

        Ok(records)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<OnIceRecord> {
    let mut skaters = [None; SKATER_SLOTS];
    for (i, slot) in skaters.iter_mut().enumerate() {
        *slot = row.get(5 + i)?;
    }

    Ok(OnIceRecord {
        game_pk: row.get(0)?,
        team_id: row.get(1)?,
        event_idx: row.get(2)?,
        line_hash: LineHash::from_hex(row.get::<_, String>(3)?),
        goalie_id: row.get(4)?,
        skaters,
    })
}
