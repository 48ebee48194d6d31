//! Season-level skater line aggregates

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use crate::errors::{sql_error, Result};
use onice_core::model::{LineHash, OnIceRecord, SKATER_SLOTS};
use rusqlite::{params, Connection, Transaction};

/// A distinct skater combination a team used in a season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkaterLine {
    pub season: i64,
    pub team_id: i64,
    pub line_hash: LineHash,
    pub skaters: [Option<i64>; SKATER_SLOTS],
}

impl SkaterLine {
    /// Distinct `(team_id, line_hash)` lines among a game's records
    pub fn from_records(season: i64, records: &[OnIceRecord]) -> Vec<SkaterLine> {
        let mut lines: BTreeMap<(i64, &LineHash), SkaterLine> = BTreeMap::new();
        for record in records {
            lines
                .entry((record.team_id, &record.line_hash))
                .or_insert_with(|| SkaterLine {
                    season,
                    team_id: record.team_id,
                    line_hash: record.line_hash.clone(),
                    skaters: record.skaters,
                });
        }
        lines.into_values().collect()
    }
}

pub struct LineRepo;

impl LineRepo {
    /// Upsert lines keyed by `(season, team_id, line_hash)`
    ///
    /// An existing line keeps its slots and `created_at`.
    pub fn upsert_skater_lines(tx: &Transaction, lines: &[SkaterLine], now: i64) -> Result<usize> {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO team_season_skater_lines (
                    season, team_id, line_hash,
                    skater_id_1, skater_id_2, skater_id_3, skater_id_4, skater_id_5, skater_id_6,
                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
                 ON CONFLICT(season, team_id, line_hash) DO UPDATE SET
                    updated_at = excluded.updated_at",
            )
            .map_err(|e| sql_error("upsert_skater_lines", e))?;

        for line in lines {
            let [s1, s2, s3, s4, s5, s6] = line.skaters;
            stmt.execute(params![
                line.season,
                line.team_id,
                line.line_hash.as_str(),
                s1,
                s2,
                s3,
                s4,
                s5,
                s6,
                now,
            ])
            .map_err(|e| sql_error("upsert_skater_lines", e).with_team_id(line.team_id))?;
        }

        Ok(lines.len())
    }

    pub fn list_skater_lines(conn: &Connection, season: i64, team_id: i64) -> Result<Vec<SkaterLine>> {
        let mut stmt = conn
            .prepare(
                "SELECT season, team_id, line_hash,
                        skater_id_1, skater_id_2, skater_id_3, skater_id_4, skater_id_5, skater_id_6
                 FROM team_season_skater_lines
                 WHERE season = ?1 AND team_id = ?2
                 ORDER BY line_hash",
            )
            .map_err(|e| sql_error("list_skater_lines", e))?;

        let lines = stmt
            .query_map(params![season, team_id], |row| {
                let mut skaters = [None; SKATER_SLOTS];
                for (i, slot) in skaters.iter_mut().enumerate() {
                    *slot = row.get(3 + i)?;
                }
                Ok(SkaterLine {
                    season: row.get(0)?,
                    team_id: row.get(1)?,
                    line_hash: LineHash::from_hex(row.get::<_, String>(2)?),
                    skaters,
                })
            })
            .map_err(|e| sql_error("list_skater_lines", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| sql_error("list_skater_lines", e))?;

        Ok(lines)
    }
}
