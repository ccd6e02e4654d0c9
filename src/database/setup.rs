use anyhow::{Context, Result};

use super::connection::DbConn;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Create missing tables; existing events are left alone
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    run_statements(conn, SCHEMA_SQL)?;
    log::debug!("Database schema verified");
    Ok(())
}

/// Drop every recorded event and recreate the schema
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    execute_sql(conn, "DROP TABLE IF EXISTS wins").context("Failed to drop wins table")?;
    run_statements(conn, SCHEMA_SQL)?;

    log::info!("Database schema reset successfully");
    Ok(())
}

fn run_statements(conn: &mut DbConn, sql: &str) -> Result<()> {
    let statements = split_sql_statements(sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection};

    #[test]
    fn test_schema_is_idempotent_and_reset_clears_events() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();
        conn.execute("INSERT INTO wins (player, delta) VALUES ('a', 1)", []).unwrap();

        reset_database(&mut conn).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM wins", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_schema_rejects_out_of_range_delta() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        ensure_schema(&mut conn).unwrap();

        let result = conn.execute("INSERT INTO wins (player, delta) VALUES ('a', 2)", []);
        assert!(result.is_err());
    }
}
