//! Extract command implementation for the Kindred CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use kindred_core::{
    Classifier, ExtractionOutcome, ExtractorConfig, InterestExtractor, InterestVector, UserId,
    VectorStore,
};
use kindred_data::{HttpClassifier, HttpClassifierConfig};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_DATABASE, ARG_DESCRIPTION, ARG_DESCRIPTION_FILE, ARG_MODEL,
    ARG_TIMEOUT_SECS, ARG_USER_ID, CliError, DEFAULT_DATABASE, ENV_EXTRACT_API_KEY,
    ENV_EXTRACT_DESCRIPTION, ENV_EXTRACT_USER_ID, block_on, open_store, parse_user_id, write_json,
};

/// CLI arguments for the `extract` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Send a profile description to the classification service, \
                 store the resulting interest vector for the user (replacing \
                 any previous vector), and print it as JSON. Classification \
                 failures store the all-minimum vector rather than failing.",
    about = "Extract and store a user's interest vector"
)]
#[ortho_config(prefix = "KINDRED")]
pub(crate) struct ExtractArgs {
    /// Identifier of the user the description belongs to.
    #[arg(value_name = "user-id")]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// Free-text self-description.
    #[arg(long = ARG_DESCRIPTION, value_name = "text")]
    #[serde(default)]
    pub(crate) description: Option<String>,
    /// Read the description from a UTF-8 file instead.
    #[arg(long = ARG_DESCRIPTION_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) description_file: Option<Utf8PathBuf>,
    /// Path to the SQLite vector database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// API key for the classification service.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Endpoint root of the chat-completions service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Model used for classification.
    #[arg(long = ARG_MODEL, value_name = "name")]
    #[serde(default)]
    pub(crate) model: Option<String>,
    /// Seconds to wait for the classifier before falling back to defaults.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ExtractArgs {
    pub(crate) fn into_config(self) -> Result<ExtractConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExtractConfig::try_from(merged)
    }
}

/// Where the description text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DescriptionSource {
    Inline(String),
    File(Utf8PathBuf),
}

impl DescriptionSource {
    pub(crate) fn read(&self) -> Result<String, CliError> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File(path) => read_description(path),
        }
    }
}

fn read_description(path: &Utf8Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadDescription {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolved `extract` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct ExtractConfig {
    pub(crate) user_id: UserId,
    pub(crate) description: DescriptionSource,
    pub(crate) database: Utf8PathBuf,
    pub(crate) classifier: HttpClassifierConfig,
}

impl ExtractConfig {
    /// Extractor settings; the classifier timeout also bounds the extraction.
    pub(crate) fn extractor(&self) -> ExtractorConfig {
        ExtractorConfig::default().with_timeout(self.classifier.timeout)
    }
}

impl TryFrom<ExtractArgs> for ExtractConfig {
    type Error = CliError;

    fn try_from(args: ExtractArgs) -> Result<Self, Self::Error> {
        let raw_user = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_USER_ID,
            env: ENV_EXTRACT_USER_ID,
        })?;
        let user_id = parse_user_id(raw_user)?;

        let description = match (args.description, args.description_file) {
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_DESCRIPTION,
                    second: ARG_DESCRIPTION_FILE,
                });
            }
            (Some(text), None) => DescriptionSource::Inline(text),
            (None, Some(path)) => DescriptionSource::File(path),
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_DESCRIPTION,
                    env: ENV_EXTRACT_DESCRIPTION,
                });
            }
        };

        let api_key = args.api_key.ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: ENV_EXTRACT_API_KEY,
        })?;
        let mut classifier = HttpClassifierConfig::new(api_key);
        if let Some(base_url) = args.base_url {
            classifier = classifier.with_base_url(base_url);
        }
        if let Some(model) = args.model {
            classifier = classifier.with_model(model);
        }
        if let Some(secs) = args.timeout_secs {
            classifier = classifier.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            user_id,
            description,
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            classifier,
        })
    }
}

/// Builds the classifier used by one `extract` invocation.
pub(crate) trait ClassifierBuilder {
    fn build(&self, config: &ExtractConfig) -> Result<Box<dyn Classifier>, CliError>;
}

pub(crate) struct HttpClassifierBuilder;

impl ClassifierBuilder for HttpClassifierBuilder {
    fn build(&self, config: &ExtractConfig) -> Result<Box<dyn Classifier>, CliError> {
        let classifier = HttpClassifier::with_config(config.classifier.clone()).map_err(
            |source| CliError::BuildClassifier {
                base_url: config.classifier.base_url.clone(),
                source,
            },
        )?;
        Ok(Box::new(classifier))
    }
}

pub(crate) fn run_extract(args: ExtractArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_extract_with(args, &HttpClassifierBuilder, &mut stdout)
}

pub(crate) fn run_extract_with(
    args: ExtractArgs,
    builder: &dyn ClassifierBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let vector = execute_extract(&config, builder)?;
    write_json(writer, &vector)
}

pub(crate) fn execute_extract(
    config: &ExtractConfig,
    builder: &dyn ClassifierBuilder,
) -> Result<InterestVector, CliError> {
    let description = config.description.read()?;
    let store = open_store(&config.database)?;
    let extractor = InterestExtractor::with_config(builder.build(config)?, config.extractor());

    let outcome = block_on(extractor.extract_detailed(&description))?;
    if let ExtractionOutcome::Defaulted { reason } = &outcome {
        info!(
            "storing default vector for user '{}': {reason}",
            config.user_id
        );
    }
    let vector = outcome.vector();
    store.save(&config.user_id, &vector)?;
    Ok(vector)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ExtractConfig, CliError> {
    let merged = ExtractArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ExtractConfig::try_from(merged)
}
