//! Rank command implementation for the Kindred CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use kindred_core::{CompatibilityScore, UserId, VectorStore};
use kindred_scorer::{RankError, rank_for_user};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_LIMIT, ARG_USER_ID, CliError, DEFAULT_DATABASE, ENV_RANK_USER_ID,
    open_store, parse_user_id, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every other stored user against the given user and \
                 print the list as JSON, best match first. A user without a \
                 stored vector yields an empty list.",
    about = "Rank stored users by compatibility"
)]
#[ortho_config(prefix = "KINDRED")]
pub(crate) struct RankArgs {
    /// Identifier of the user to rank candidates for.
    #[arg(value_name = "user-id")]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// Path to the SQLite vector database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Print at most this many matches.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) user_id: UserId,
    pub(crate) database: Utf8PathBuf,
    pub(crate) limit: Option<usize>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let raw_user = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_USER_ID,
            env: ENV_RANK_USER_ID,
        })?;
        Ok(Self {
            user_id: parse_user_id(raw_user)?,
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            limit: args.limit,
        })
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_store(&config.database)?;
    let ranked = execute_rank(&store, &config)?;
    write_json(writer, &ranked)
}

/// Rank for the configured user; a user without a vector ranks nobody.
pub(crate) fn execute_rank<S>(
    store: &S,
    config: &RankConfig,
) -> Result<Vec<CompatibilityScore>, CliError>
where
    S: VectorStore + ?Sized,
{
    let mut ranked = match rank_for_user(store, &config.user_id) {
        Ok(ranked) => ranked,
        Err(err @ RankError::MissingSubject { .. }) => {
            info!("{err}; returning no matches");
            Vec::new()
        }
        Err(err) => return Err(CliError::Rank(err)),
    };
    if let Some(limit) = config.limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}
