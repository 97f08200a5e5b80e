//! Tests against a database file, reopened between runs.

mod common;
use common::*;

use oxide_query::prelude::*;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

async fn open(path: &std::path::Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open database file")
}

#[tokio::test]
async fn committed_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");

    let executor = QueryExecutor::new(open(&path).await, Symbols::default());
    rows(&executor, "CREATE TABLE notes (id INTEGER, body TEXT, data BLOB)", "").await;
    let (summary, _) = run(
        &executor,
        "INSERT INTO notes VALUES (?, ?, ?)",
        &[],
        "1 'it''s' {cafe}\n2 plain nil\n",
    )
    .await
    .unwrap();
    assert_eq!(summary.executions, 2);
    executor.pool().close().await;

    let executor = QueryExecutor::new(open(&path).await, Symbols::default());
    assert_eq!(
        rows(&executor, "SELECT id, body, data FROM notes ORDER BY id", "").await,
        "1\t'it''s'\t{cafe}\n2\t'plain'\tnil\n"
    );
}

#[tokio::test]
async fn failed_run_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rollback.db");

    let executor = QueryExecutor::new(open(&path).await, Symbols::default());
    rows(&executor, "CREATE TABLE t (a)", "").await;
    let result = run(&executor, "INSERT INTO t VALUES (?)", &[], "1\n{0}\n").await;
    assert!(result.is_err());
    executor.pool().close().await;

    let executor = QueryExecutor::new(open(&path).await, Symbols::default());
    assert_eq!(rows(&executor, "SELECT count(*) FROM t", "").await, "0\n");
}
