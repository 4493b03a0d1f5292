//! Chat-completions `Classifier` implementation.

use std::time::Duration;

use async_trait::async_trait;
use kindred_core::{ClassificationRequest, Classifier, ClassifierError};
use log::debug;
use reqwest::Client;
use thiserror::Error;

use super::openai::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope};

/// Errors raised while constructing an [`HttpClassifier`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// No API key was configured.
    #[error("classification service API key must not be empty")]
    MissingApiKey,
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default endpoint root for chat completions.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model used for classification.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature; low to keep ratings stable.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Default user agent for classification requests.
pub const DEFAULT_USER_AGENT: &str = "kindred-classifier/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpClassifier`].
#[derive(Clone)]
pub struct HttpClassifierConfig {
    /// Endpoint root; `/chat/completions` is appended.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClassifierConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpClassifierConfig {
    /// Create a configuration using `api_key` and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the classifier at a different endpoint root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Classifier backed by a chat-completions HTTP endpoint.
///
/// One request is made per classification; there is no retry. Failures are
/// reported as [`ClassifierError`] for the extractor to log and default.
pub struct HttpClassifier {
    client: Client,
    config: HttpClassifierConfig,
}

impl std::fmt::Debug for HttpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpClassifier {
    /// Create a classifier for the default endpoint using `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpClassifierConfig::new(api_key))
    }

    /// Create a classifier with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to build.
    pub fn with_config(config: HttpClassifierConfig) -> Result<Self, ProviderBuildError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderBuildError::MissingApiKey);
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Borrow the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpClassifierConfig {
        &self.config
    }

    /// Full URL of the completions endpoint.
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Convert a reqwest error to a `ClassifierError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ClassifierError {
        if error.is_timeout() {
            return ClassifierError::Timeout {
                timeout: self.config.timeout,
            };
        }

        if let Some(status) = error.status() {
            return ClassifierError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ClassifierError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Describe a non-success body, preferring the service's own message.
fn describe_error_body(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| body.trim().to_owned(),
        |envelope| envelope.error.message,
    )
}

/// Convert a decoded completion into the raw classification text.
fn convert_response(response: ChatCompletionResponse) -> Result<String, ClassifierError> {
    if let Some(error) = response.error {
        let message = match error.kind {
            Some(kind) => format!("{} ({kind})", error.message),
            None => error.message,
        };
        return Err(ClassifierError::Service { message });
    }

    response
        .first_content()
        .filter(|content| !content.trim().is_empty())
        .ok_or(ClassifierError::EmptyResponse)
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<String, ClassifierError> {
        let url = self.completions_url();
        let prompt = request.prompt();
        let body =
            ChatCompletionRequest::single_prompt(&self.config.model, self.config.temperature, &prompt);

        debug!("requesting classification from {url} using {}", self.config.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        if !status.is_success() {
            return Err(ClassifierError::Http {
                url,
                status: status.as_u16(),
                message: describe_error_body(&text),
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|err| ClassifierError::Parse {
                message: err.to_string(),
            })?;

        convert_response(completion)
    }
}
