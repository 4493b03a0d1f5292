//! Error types for the Kindred CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use kindred_core::{SqliteVectorStoreError, UserIdError};
use kindred_data::ProviderBuildError;
use kindred_scorer::RankError;
use thiserror::Error;

/// Errors emitted by the Kindred CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag.
        field: &'static str,
        /// Environment variable that can supply it instead.
        env: &'static str,
    },
    /// Two options that exclude each other were both supplied.
    #[error("--{first} and --{second} cannot be combined")]
    ConflictingArguments {
        /// The first flag.
        first: &'static str,
        /// The flag it conflicts with.
        second: &'static str,
    },
    /// The user id was blank.
    #[error("invalid user id {raw:?}: {source}")]
    InvalidUserId {
        /// The rejected input.
        raw: String,
        /// Why it was rejected.
        #[source]
        source: UserIdError,
    },
    /// Reading the description file failed.
    #[error("failed to read description from {path:?}: {source}")]
    ReadDescription {
        /// Path to the description file.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The vector database could not be opened, read, or written.
    #[error(transparent)]
    Store(#[from] SqliteVectorStoreError),
    /// Constructing the HTTP classifier failed.
    #[error("failed to build classifier for {base_url:?}: {source}")]
    BuildClassifier {
        /// Endpoint the classifier was configured for.
        base_url: String,
        /// Underlying construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Ranking failed for a reason other than a missing subject.
    #[error("ranking failed: {0}")]
    Rank(#[source] RankError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
