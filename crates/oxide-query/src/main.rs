//! oxide-query CLI
//!
//! Runs one SQL statement, binding parameters from arguments and standard
//! input, and prints result rows to standard output.

use std::str::FromStr;

use clap::Parser;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::io::{BufReader, stdin};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_query::prelude::*;

/// Run a SQLite statement once per line of plain-text parameters.
#[derive(Parser)]
#[command(name = "oxide-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database path, `sqlite:` URL or `:memory:`; created if missing.
    database: String,

    /// SQL statement to run.
    query: String,

    /// Values for the leading parameters; the rest are read from standard input.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    parameters: Vec<String>,

    /// Decimal point accepted in floating-point parameters.
    #[arg(long, env = "OXIDE_QUERY_RADIX", default_value_t = '.')]
    radix: char,

    /// Positive sign accepted at the start of numeric parameters.
    #[arg(long, env = "OXIDE_QUERY_POSITIVE_SIGN", default_value_t = '+')]
    positive_sign: char,

    /// Negative sign accepted at the start of numeric parameters.
    #[arg(long, env = "OXIDE_QUERY_NEGATIVE_SIGN", default_value_t = '-')]
    negative_sign: char,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Rows go to stdout, diagnostics to stderr
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = SqliteConnectOptions::from_str(&cli.database)
        .map_err(QueryError::Connect)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(QueryError::Connect)?;
    debug!(database = %cli.database, "Opened database");

    let symbols = Symbols::new(cli.radix, cli.positive_sign, cli.negative_sign);
    let executor = QueryExecutor::new(pool, symbols);

    let input = BufReader::new(stdin());
    let mut output = std::io::stdout().lock();
    executor
        .run(&cli.query, &cli.parameters, input, &mut output)
        .await?;

    executor.pool().close().await;
    Ok(())
}
