//! Statement executor.
//!
//! This module runs one prepared statement inside a single transaction, once
//! for the command-line arguments alone or once per input record, and writes
//! every result row to the output.

use std::io::Write;

use futures::TryStreamExt;
use oxide_query_core::{encode_row, SqlValue, Symbols};
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqliteRow, SqliteStatement};
use sqlx::{Either, Executor, Row, Statement, TypeInfo, ValueRef};
use tokio::io::AsyncBufRead;
use tracing::{debug, info, trace};

use crate::binder::Bindings;
use crate::error::{QueryError, Result};
use crate::placeholder::find_named_parameter;
use crate::source::{bind_arguments, StreamSource};

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of times the statement was executed.
    pub executions: usize,
    /// Number of result rows written.
    pub rows: usize,
}

/// Executes statements against a database.
pub struct QueryExecutor {
    pool: SqlitePool,
    symbols: Symbols,
}

impl QueryExecutor {
    /// Creates a new executor parsing numbers with `symbols`.
    #[must_use]
    pub const fn new(pool: SqlitePool, symbols: Symbols) -> Self {
        Self { pool, symbols }
    }

    /// Returns the pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs `sql` and writes its result rows to `output`.
    ///
    /// `arguments` fill the leading parameters. If the statement has more
    /// parameters than that, the rest are read from `input` and the statement
    /// runs once per record until the input ends; otherwise it runs exactly
    /// once and `input` is never read. All executions share one transaction,
    /// committed only if every one of them succeeds.
    pub async fn run<R, W>(
        &self,
        sql: &str,
        arguments: &[String],
        input: R,
        output: &mut W,
    ) -> Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut tx = self.pool.begin().await.map_err(QueryError::Begin)?;
        let statement = (&mut *tx)
            .prepare(sql)
            .await
            .map_err(QueryError::Prepare)?;

        let mut bindings = Bindings::new(parameter_count(&statement));
        if bindings.count() > 0 {
            if let Some(name) = find_named_parameter(sql) {
                return Err(QueryError::NamedParameter(name.to_string()));
            }
        }
        let offset = bind_arguments(arguments, &self.symbols, &mut bindings)?;
        debug!(
            parameters = bindings.count(),
            arguments = offset,
            "Prepared statement"
        );

        let mut summary = RunSummary::default();
        if bindings.count() > offset {
            let mut source = StreamSource::new(input);
            while source
                .next_record(&mut bindings, offset, &self.symbols)
                .await?
            {
                trace!(values = ?bindings.values(), "Bound record");
                summary.rows += execute(&mut tx, &statement, &bindings, output).await?;
                summary.executions += 1;
                trace!(execution = summary.executions, "Reset statement");
            }
            debug!(lines = source.lines_read(), "Input exhausted");
        } else {
            summary.rows += execute(&mut tx, &statement, &bindings, output).await?;
            summary.executions += 1;
        }

        tx.commit().await.map_err(QueryError::Commit)?;
        info!(
            executions = summary.executions,
            rows = summary.rows,
            "Committed transaction"
        );
        Ok(summary)
    }
}

/// Returns the number of parameters `statement` declares.
fn parameter_count(statement: &SqliteStatement<'_>) -> usize {
    match statement.parameters() {
        Some(Either::Left(types)) => types.len(),
        Some(Either::Right(count)) => count,
        None => 0,
    }
}

/// Executes `statement` once with `bindings` and writes every row it yields.
async fn execute<W: Write>(
    conn: &mut SqliteConnection,
    statement: &SqliteStatement<'_>,
    bindings: &Bindings,
    output: &mut W,
) -> Result<usize> {
    let mut rows = bindings.apply(statement.query()).fetch(conn);
    let mut count = 0;

    while let Some(row) = rows.try_next().await.map_err(QueryError::Evaluate)? {
        let line = encode_row(&decode_row(&row)?);
        output
            .write_all(&line)
            .and_then(|()| output.flush())
            .map_err(QueryError::Write)?;
        count += 1;
    }

    Ok(count)
}

/// Reads every column of `row` by the storage class of its value.
///
/// Text is read as bytes, so text that is not valid UTF-8 is kept as is.
fn decode_row(row: &SqliteRow) -> Result<Vec<SqlValue>> {
    (0..row.len())
        .map(|column| decode_column(row, column))
        .collect()
}

fn decode_column(row: &SqliteRow, column: usize) -> Result<SqlValue> {
    let decode = |source| QueryError::Decode { column, source };

    let raw = row.try_get_raw(column).map_err(decode)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let storage = raw.type_info().name().to_owned();

    let value = match storage.as_str() {
        "INTEGER" => SqlValue::Integer(row.try_get_unchecked(column).map_err(decode)?),
        "REAL" => SqlValue::Float(row.try_get_unchecked(column).map_err(decode)?),
        "TEXT" => SqlValue::Text(row.try_get_unchecked::<Vec<u8>, _>(column).map_err(decode)?),
        _ => SqlValue::Blob(row.try_get_unchecked(column).map_err(decode)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool")
    }

    async fn run(sql: &str, arguments: &[&str], input: &str) -> (Result<RunSummary>, String) {
        let executor = QueryExecutor::new(create_test_pool().await, Symbols::default());
        let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
        let mut output = Vec::new();
        let result = executor
            .run(sql, &arguments, input.as_bytes(), &mut output)
            .await;
        (result, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_no_parameters_runs_once() {
        let (result, output) = run("SELECT 1, 'a', NULL", &[], "ignored\n").await;
        assert_eq!(
            result.unwrap(),
            RunSummary {
                executions: 1,
                rows: 1
            }
        );
        assert_eq!(output, "1\t'a'\tnil\n");
    }

    #[tokio::test]
    async fn test_arguments_only_runs_once() {
        let (result, output) = run("SELECT ?, ?", &["-3", "{ff}"], "1 2\n").await;
        assert_eq!(result.unwrap().executions, 1);
        assert_eq!(output, "-3\t{ff}\n");
    }

    #[tokio::test]
    async fn test_record_per_line() {
        let (result, output) = run("SELECT ? + ?", &[], "1 2\n3 4\n").await;
        assert_eq!(
            result.unwrap(),
            RunSummary {
                executions: 2,
                rows: 2
            }
        );
        assert_eq!(output, "3\n7\n");
    }

    #[tokio::test]
    async fn test_arguments_then_records() {
        let (result, output) = run("SELECT ?, ?", &["'x'"], "1\n2.5\n").await;
        assert_eq!(result.unwrap().executions, 2);
        assert_eq!(output, "'x'\t1\n'x'\t2.5\n");
    }

    #[tokio::test]
    async fn test_value_types_round_trip() {
        let (result, output) = run(
            "SELECT ?, ?, ?, ?, ?, ?",
            &[],
            "nil 42 0.1 'it''s' {0aff} [2]\n",
        )
        .await;
        result.unwrap();
        assert_eq!(output, "nil\t42\t0.1\t'it''s'\t{0aff}\t{0000}\n");
    }

    #[tokio::test]
    async fn test_statement_without_rows() {
        let (result, output) = run("SELECT 1 WHERE ? = 2", &[], "1\n2\n").await;
        assert_eq!(
            result.unwrap(),
            RunSummary {
                executions: 2,
                rows: 1
            }
        );
        assert_eq!(output, "1\n");
    }

    #[tokio::test]
    async fn test_text_column_keeps_raw_bytes() {
        let executor = QueryExecutor::new(create_test_pool().await, Symbols::default());
        let mut output = Vec::new();
        executor
            .run(
                "SELECT CAST(x'41ff42' AS TEXT), CAST(x'27ff' AS TEXT)",
                &[],
                &b""[..],
                &mut output,
            )
            .await
            .unwrap();
        assert_eq!(output, b"'A\xffB'\t'''\xff'\n");
    }

    #[tokio::test]
    async fn test_named_parameter_rejected_before_input() {
        let (result, output) = run("SELECT :a, @b", &[], "1 2\n").await;
        assert!(matches!(
            result,
            Err(QueryError::NamedParameter(ref name)) if name == ":a"
        ));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_zero_blob_too_big() {
        let (result, _) = run("SELECT length(?)", &[], "[1000000001]\n").await;
        assert!(matches!(
            result,
            Err(QueryError::TooBig {
                slot: 1,
                length: 1_000_000_001
            })
        ));
    }

    #[tokio::test]
    async fn test_too_many_arguments() {
        let (result, _) = run("SELECT ?", &["1", "2"], "").await;
        assert!(matches!(
            result,
            Err(QueryError::ParameterOutOfRange { slot: 2, count: 1 })
        ));
    }

    #[tokio::test]
    async fn test_prepare_error() {
        let (result, _) = run("SELEC 1", &[], "").await;
        assert!(matches!(result, Err(QueryError::Prepare(_))));
    }
}
