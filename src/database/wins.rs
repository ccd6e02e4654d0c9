use chrono::{DateTime, Utc};
use rusqlite::params;

use super::connection::DbConn;
use super::models::WinRow;
use crate::domain::{Delta, Player, WinEvent};
use crate::errors::PersistenceError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn insert_win(conn: &mut DbConn, player: Player, delta: Delta) -> Result<WinEvent, PersistenceError> {
    let sql = "INSERT INTO wins (player, delta) VALUES (?1, ?2) RETURNING id, player, delta, created_at";

    let row = conn
        .query_row(sql, params![player.as_str(), delta.value()], parse_win_row)
        .map_err(|source| PersistenceError::Rejected { operation: "insert win", source })?;

    WinEvent::try_from(row)
}

fn parse_win_row(row: &rusqlite::Row) -> rusqlite::Result<WinRow> {
    Ok(WinRow {
        id: row.get(0)?,
        player: row.get(1)?,
        delta: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<WinEvent>, PersistenceError> {
    let sql = "SELECT id, player, delta, created_at FROM wins ORDER BY created_at ASC, id ASC";

    query_events(conn, sql, [], "list wins")
}

pub fn list_since(conn: &mut DbConn, since: DateTime<Utc>) -> Result<Vec<WinEvent>, PersistenceError> {
    let sql = "SELECT id, player, delta, created_at FROM wins WHERE created_at >= ?1 ORDER BY created_at ASC, id ASC";
    let since = since.format(TIMESTAMP_FORMAT).to_string();

    query_events(conn, sql, params![since], "list recent wins")
}

fn query_events<P: rusqlite::Params>(
    conn: &mut DbConn,
    sql: &str,
    params: P,
    operation: &'static str,
) -> Result<Vec<WinEvent>, PersistenceError> {
    let rejected = |source| PersistenceError::Rejected { operation, source };

    let mut stmt = conn.prepare(sql).map_err(rejected)?;
    let rows = stmt
        .query_map(params, parse_win_row)
        .map_err(rejected)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(rejected)?;

    rows.into_iter().map(WinEvent::try_from).collect()
}

#[cfg(test)]
pub(crate) fn insert_win_at(
    conn: &mut DbConn,
    player: Player,
    delta: Delta,
    created_at: DateTime<Utc>,
) -> WinEvent {
    let sql = "INSERT INTO wins (player, delta, created_at) VALUES (?1, ?2, ?3) RETURNING id, player, delta, created_at";
    let stamp = created_at.format(TIMESTAMP_FORMAT).to_string();
    let row = conn
        .query_row(sql, params![player.as_str(), delta.value(), stamp], parse_win_row)
        .unwrap();
    WinEvent::try_from(row).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup::ensure_schema};
    use chrono::TimeZone;

    fn fresh_conn() -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        ensure_schema(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_assigns_id_and_timestamp() {
        let mut conn = fresh_conn();

        let first = insert_win(&mut conn, Player::A, Delta::Win).unwrap();
        let second = insert_win(&mut conn, Player::A, Delta::Win).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.player, Player::A);
        assert_eq!(first.delta, Delta::Win);
        assert!(second.created_at >= first.created_at);
    }

    #[test]
    fn test_list_all_orders_by_timestamp_then_id() {
        let mut conn = fresh_conn();
        let noon = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

        let late = insert_win_at(&mut conn, Player::A, Delta::Win, noon);
        let tie = insert_win_at(&mut conn, Player::B, Delta::Win, noon);
        let early = insert_win_at(&mut conn, Player::B, Delta::Undo, morning);

        let ids: Vec<_> = list_all(&mut conn).unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![early.id, late.id, tie.id]);
    }

    #[test]
    fn test_list_since_filters_window() {
        let mut conn = fresh_conn();
        let old = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let recent = Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap();
        insert_win_at(&mut conn, Player::A, Delta::Win, old);
        let kept = insert_win_at(&mut conn, Player::B, Delta::Win, recent);

        let since = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let events = list_since(&mut conn, since).unwrap();

        assert_eq!(events, vec![kept]);
        assert_eq!(events[0].created_at, recent);
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let mut conn = fresh_conn();
        conn.execute_batch(
            "DROP TABLE wins; CREATE TABLE wins (id INTEGER PRIMARY KEY, player TEXT, delta INTEGER, created_at TEXT);
             INSERT INTO wins (player, delta, created_at) VALUES ('z', 1, '2026-01-01 00:00:00.000');",
        )
        .unwrap();

        assert!(matches!(list_all(&mut conn), Err(PersistenceError::Corrupt(_))));
    }
}
