//! Games, play-by-play and contributor rows

#![allow(clippy::result_large_err)]

use crate::errors::{sql_error, Result};
use onice_core::model::{Event, GameInfo};
use rusqlite::{params, Connection, Transaction};

pub struct GameRepo;

impl GameRepo {
    /// Remove every per-game row so a rerun replaces rather than appends
    ///
    /// Season line aggregates are shared across games and are left alone.
    pub fn delete_game_rows(tx: &Transaction, game_pk: i64) -> Result<()> {
        for sql in [
            "DELETE FROM play_by_play_contributor WHERE game_pk = ?1",
            "DELETE FROM play_by_play_on_ice WHERE game_pk = ?1",
            "DELETE FROM play_by_play WHERE game_pk = ?1",
            "DELETE FROM games WHERE game_pk = ?1",
        ] {
            tx.execute(sql, params![game_pk])
                .map_err(|e| sql_error("delete_game_rows", e).with_game_pk(game_pk))?;
        }
        Ok(())
    }

    pub fn insert_game(tx: &Transaction, game: &GameInfo, now: i64) -> Result<()> {
        tx.execute(
            "INSERT INTO games (game_pk, game_type, season, start_time, away_team_id, home_team_id, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                game.game_pk,
                game.game_type,
                game.season,
                game.start_time,
                game.away_team_id,
                game.home_team_id,
                now,
            ],
        )
        .map_err(|e| sql_error("insert_game", e).with_game_pk(game.game_pk))?;
        Ok(())
    }

    /// Insert play-by-play rows and their contributors
    ///
    /// Returns `(plays, contributors)` written.
    pub fn insert_plays(
        tx: &Transaction,
        game_pk: i64,
        events: &[Event],
        now: i64,
    ) -> Result<(usize, usize)> {
        let mut play_stmt = tx
            .prepare_cached(
                "INSERT INTO play_by_play (
                    game_pk, event_idx, event_id, period, period_type, period_time, date_time,
                    goals_away, goals_home, event, event_code, event_type_id, description,
                    secondary_type, coord_x, coord_y, team_id, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            )
            .map_err(|e| sql_error("insert_plays", e))?;
        let mut contributor_stmt = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO play_by_play_contributor (game_pk, event_idx, player_id, player_type)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| sql_error("insert_plays", e))?;

        let mut contributors = 0;
        for event in events {
            play_stmt
                .execute(params![
                    game_pk,
                    event.event_idx,
                    event.event_id,
                    event.period,
                    event.period_type,
                    event.period_time,
                    event.date_time,
                    event.goals.away,
                    event.goals.home,
                    event.result.event,
                    event.result.event_code,
                    event.result.event_type_id,
                    event.result.description,
                    event.result.secondary_type,
                    event.coordinates.map(|c| c.x),
                    event.coordinates.map(|c| c.y),
                    event.team_id,
                    now,
                ])
                .map_err(|e| {
                    sql_error("insert_plays", e)
                        .with_game_pk(game_pk)
                        .with_event_idx(event.event_idx)
                })?;

            for contributor in &event.contributors {
                contributors += contributor_stmt
                    .execute(params![
                        game_pk,
                        event.event_idx,
                        contributor.player_id,
                        contributor.player_type,
                    ])
                    .map_err(|e| {
                        sql_error("insert_plays", e)
                            .with_game_pk(game_pk)
                            .with_event_idx(event.event_idx)
                    })?;
            }
        }

        Ok((events.len(), contributors))
    }

    pub fn game_exists(conn: &Connection, game_pk: i64) -> Result<bool> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM games WHERE game_pk = ?1",
                params![game_pk],
                |row| row.get(0),
            )
            .map_err(|e| sql_error("game_exists", e))?;
        Ok(count > 0)
    }

    pub fn count_plays(conn: &Connection, game_pk: i64) -> Result<usize> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM play_by_play WHERE game_pk = ?1",
                params![game_pk],
                |row| row.get(0),
            )
            .map_err(|e| sql_error("count_plays", e))?;
        Ok(count as usize)
    }
}
