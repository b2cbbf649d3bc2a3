#![forbid(unsafe_code)]

//! Developer SQL console: validation, execution and schema introspection.
//!
//! None of these methods fail; problems are reported inside the returned value
//! and recorded in the log service.

use super::{ColumnInfo, QueryResult, QueryRow, QueryValidation, SqlValue, SqliteStore, TableInfo};
use rusqlite::{Connection, Statement, params};
use vc_core::logbook::LogSource;
use vc_core::query::{StatementKind, has_trailing_statement, is_dangerous, preview};

const PREVIEW_CHARS: usize = 100;

impl SqliteStore {
    pub fn validate_query(&self, sql: &str) -> QueryValidation {
        let sql = sql.trim();
        if sql.is_empty() {
            return QueryValidation {
                is_valid: false,
                is_dangerous: false,
                message: Some("Query cannot be empty".to_string()),
            };
        }

        let dangerous = is_dangerous(sql);
        match prepare_single(&self.conn, sql) {
            Ok(_) => QueryValidation {
                is_valid: true,
                is_dangerous: dangerous,
                message: dangerous.then(|| {
                    "Warning: This query contains potentially dangerous operations".to_string()
                }),
            },
            Err(message) => QueryValidation {
                is_valid: false,
                is_dangerous: false,
                message: Some(message),
            },
        }
    }

    /// Runs one statement. Reads return their rows; anything else returns a
    /// single synthetic `Result` row with the affected-row count.
    pub fn execute_sql(&mut self, sql: &str) -> QueryResult {
        let sql = sql.trim();
        if sql.is_empty() {
            return QueryResult::failed("Query cannot be empty");
        }

        let kind = StatementKind::classify(sql);
        self.logbook.info(
            LogSource::Database,
            "Executing developer SQL query",
            Some(format!(
                "kind={} sql={}",
                kind.as_str(),
                preview(sql, PREVIEW_CHARS)
            )),
        );

        let mut outcome = match kind {
            StatementKind::Read => run_read(&self.conn, sql),
            StatementKind::Write => run_write(&self.conn, sql),
        };

        // Store writes open their own transactions on this connection; one left
        // open by `BEGIN` or `SAVEPOINT` would make every later write fail.
        if !self.conn.is_autocommit() {
            if let Err(err) = self.conn.execute_batch("ROLLBACK") {
                self.logbook.warning(
                    LogSource::Database,
                    "Rollback after console statement failed",
                    Some(format!("error={err}")),
                );
            }
            outcome = Err(
                "Transaction control statements are not supported in the console".to_string(),
            );
        }

        match outcome {
            Ok(result) => {
                self.logbook.info(
                    LogSource::Database,
                    "SQL query completed",
                    Some(format!(
                        "rows={} affected={}",
                        result.rows.len(),
                        result.affected_rows.unwrap_or(0)
                    )),
                );
                result
            }
            Err(message) => {
                self.logbook.error(
                    LogSource::Database,
                    "SQL execution failed",
                    Some(format!(
                        "error={message} sql={}",
                        preview(sql, PREVIEW_CHARS)
                    )),
                );
                QueryResult::failed(message)
            }
        }
    }

    /// Tables (excluding SQLite internals) with their columns and index names.
    pub fn schema(&self) -> Vec<TableInfo> {
        match read_schema(&self.conn) {
            Ok(tables) => tables,
            Err(err) => {
                self.logbook.error(
                    LogSource::Database,
                    "Failed to read database schema",
                    Some(format!("error={err}")),
                );
                Vec::new()
            }
        }
    }
}

/// Prepares exactly one statement; `Connection::prepare` would silently drop
/// anything after the first.
fn prepare_single<'c>(conn: &'c Connection, sql: &str) -> Result<Statement<'c>, String> {
    if has_trailing_statement(sql) {
        return Err("Only one statement can be executed at a time".to_string());
    }
    conn.prepare(sql).map_err(|err| err.to_string())
}

fn run_read(conn: &Connection, sql: &str) -> Result<QueryResult, String> {
    let stmt = prepare_single(conn, sql)?;
    collect_rows(stmt)
}

fn collect_rows(mut stmt: Statement<'_>) -> Result<QueryResult, String> {
    let columns = unique_column_names(stmt.column_names());

    let mut rows = stmt.query([]).map_err(|err| err.to_string())?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(|err| err.to_string())? {
        let mut cells = Vec::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            let value = row.get_ref(idx).map_err(|err| err.to_string())?;
            cells.push((name.clone(), SqlValue::from(value)));
        }
        out.push(QueryRow { cells });
    }

    Ok(QueryResult {
        columns,
        rows: out,
        error: None,
        affected_rows: None,
    })
}

fn run_write(conn: &Connection, sql: &str) -> Result<QueryResult, String> {
    let mut stmt = prepare_single(conn, sql)?;
    // PRAGMA, WITH ... SELECT and RETURNING clauses produce rows despite the prefix.
    if stmt.column_count() > 0 {
        return collect_rows(stmt);
    }
    let before = total_changes(conn)?;
    let changed = stmt.raw_execute().map_err(|err| err.to_string())?;
    // `changes()` keeps the previous DML count across DDL and transaction
    // statements; only trust it when the running total moved.
    let affected = if total_changes(conn)? == before { 0 } else { changed };
    Ok(QueryResult::write_summary(affected))
}

fn total_changes(conn: &Connection) -> Result<i64, String> {
    conn.query_row("SELECT total_changes()", [], |row| row.get(0))
        .map_err(|err| err.to_string())
}

/// Repeated names (`SELECT * FROM a JOIN b`) get a `:N` suffix so every cell
/// keeps its own key.
fn unique_column_names(names: Vec<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.to_string();
        let mut n = 1;
        while out.contains(&candidate) {
            candidate = format!("{name}:{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

fn read_schema(conn: &Connection) -> rusqlite::Result<Vec<TableInfo>> {
    let mut tables_stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name ASC",
    )?;
    let names = tables_stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut columns_stmt = conn.prepare(
        "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let mut indexes_stmt =
        conn.prepare("SELECT name FROM pragma_index_list(?1) ORDER BY name ASC")?;

    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let columns = columns_stmt
            .query_map(params![name], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    column_type: row.get(1)?,
                    nullable: row.get::<_, i64>(2)? == 0,
                    default_value: row.get(3)?,
                    primary_key: row.get::<_, i64>(4)? > 0,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let indexes = indexes_stmt
            .query_map(params![name], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out.push(TableInfo {
            name,
            columns,
            indexes,
        });
    }
    Ok(out)
}
