//! Command-line interface for the Kindred interest-compatibility engine.
//!
//! Three subcommands share one SQLite vector database:
//!
//! - `extract` classifies a free-text description and stores the vector.
//! - `rank` lists every other stored user by compatibility.
//! - `export` prints every stored vector as a flat tuple.
//!
//! Options can come from CLI flags, configuration files, or `KINDRED_*`
//! environment variables.
#![forbid(unsafe_code)]

use std::future::Future;
use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use kindred_core::{SqliteVectorStore, UserId};
use serde::Serialize;

mod error;
mod export;
mod extract;
mod rank;

pub use error::CliError;

use export::{ExportArgs, run_export};
use extract::{ExtractArgs, run_extract};
use rank::{RankArgs, run_rank};

const ARG_USER_ID: &str = "user-id";
const ARG_DESCRIPTION: &str = "description";
const ARG_DESCRIPTION_FILE: &str = "description-file";
const ARG_DATABASE: &str = "database";
const ARG_API_KEY: &str = "api-key";
const ARG_BASE_URL: &str = "base-url";
const ARG_MODEL: &str = "model";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_LIMIT: &str = "limit";
const ENV_EXTRACT_USER_ID: &str = "KINDRED_CMDS_EXTRACT_USER_ID";
const ENV_EXTRACT_DESCRIPTION: &str = "KINDRED_CMDS_EXTRACT_DESCRIPTION";
const ENV_EXTRACT_API_KEY: &str = "KINDRED_CMDS_EXTRACT_API_KEY";
const ENV_RANK_USER_ID: &str = "KINDRED_CMDS_RANK_USER_ID";

/// Database used when `--database` is not supplied.
const DEFAULT_DATABASE: &str = "kindred.db";

/// Run the Kindred CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// database cannot be used, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Rank(args) => run_rank(args),
        Command::Export(args) => run_export(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "kindred",
    about = "Interest extraction and compatibility ranking for Kindred profiles",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a description into an interest vector and store it.
    Extract(ExtractArgs),
    /// Rank every other stored user by compatibility with one user.
    Rank(RankArgs),
    /// Print every stored vector as `[user_id, score_1, …, score_30]`.
    Export(ExportArgs),
}

fn parse_user_id(raw: String) -> Result<UserId, CliError> {
    UserId::new(raw.clone()).map_err(|source| CliError::InvalidUserId { raw, source })
}

fn open_store(path: &Utf8Path) -> Result<SqliteVectorStore, CliError> {
    Ok(SqliteVectorStore::open(path.as_std_path())?)
}

fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(future))
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
