//! Export command implementation for the Kindred CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use kindred_core::{SqliteVectorStore, VectorStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ARG_DATABASE, CliError, DEFAULT_DATABASE, open_store, write_json};

/// CLI arguments for the `export` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print every stored interest vector as a JSON array of \
                 tuples, one `[user_id, score_1, …, score_30]` row per user \
                 in user-id order. Scores follow the fixed category order.",
    about = "Export stored interest vectors"
)]
#[ortho_config(prefix = "KINDRED")]
pub(crate) struct ExportArgs {
    /// Path to the SQLite vector database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl ExportArgs {
    fn database(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(merged
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)))
    }
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_export_with(args, &mut stdout)
}

pub(crate) fn run_export_with(args: ExportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let store = open_store(&args.database()?)?;
    let rows = export_rows(&store)?;
    write_json(writer, &rows)
}

/// Render every stored vector as an export tuple.
pub(crate) fn export_rows(store: &SqliteVectorStore) -> Result<Vec<Vec<Value>>, CliError> {
    Ok(store
        .load_all()?
        .iter()
        .map(|(user, vector)| vector.to_row(user))
        .collect())
}
