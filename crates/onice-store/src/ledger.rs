//! ETL status ledger
//!
//! One row per game in `etl_game_status`. A game with no row has never been
//! picked up and reads as `Pending`.

#![allow(clippy::result_large_err)]

use crate::errors::{sql_error, Result};
use onice_core::errors::ExError;
use onice_core::model::GameStatus;
use rusqlite::{params, Connection, OptionalExtension};

pub fn get_status(conn: &Connection, game_pk: i64) -> Result<GameStatus> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT status FROM etl_game_status WHERE game_pk = ?1",
            params![game_pk],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| sql_error("get_status", e).with_game_pk(game_pk))?;

    match raw {
        None => Ok(GameStatus::Pending),
        Some(value) => value
            .parse()
            .map_err(|e| ExError::from(e).with_game_pk(game_pk)),
    }
}

/// Record a game's status, replacing any previous one
///
/// Takes a plain `&Connection` so it also runs on a `Transaction`.
pub fn set_status(conn: &Connection, game_pk: i64, status: GameStatus) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO etl_game_status (game_pk, status, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(game_pk) DO UPDATE SET
            status = excluded.status,
            updated_at = excluded.updated_at",
        params![game_pk, status.as_str(), now],
    )
    .map_err(|e| sql_error("set_status", e).with_game_pk(game_pk))?;

    tracing::debug!(game_pk, status = %status, "Updated ETL game status");
    Ok(())
}
