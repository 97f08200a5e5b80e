#![allow(dead_code)]

use oxide_query::prelude::*;
use sqlx::sqlite::SqlitePool;

pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool")
}

pub async fn executor() -> QueryExecutor {
    QueryExecutor::new(memory_pool().await, Symbols::default())
}

/// Runs `sql` with `arguments` and `input`, returning the summary and the
/// rows written.
pub async fn run(
    executor: &QueryExecutor,
    sql: &str,
    arguments: &[&str],
    input: &str,
) -> Result<(RunSummary, String)> {
    let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
    let mut output = Vec::new();
    let summary = executor
        .run(sql, &arguments, input.as_bytes(), &mut output)
        .await?;
    let output = String::from_utf8(output).expect("Rows are not valid UTF-8");
    Ok((summary, output))
}

/// Runs `sql` and panics on failure, returning only the rows written.
pub async fn rows(executor: &QueryExecutor, sql: &str, input: &str) -> String {
    run(executor, sql, &[], input)
        .await
        .unwrap_or_else(|e| panic!("Failed to run: {sql}\nError: {e:?}"))
        .1
}
