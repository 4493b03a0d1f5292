//! HTTP-based classifiers speaking the chat-completions protocol.
//!
//! [`HttpClassifier`] sends the extractor's prompt as a single user message
//! and hands back the first choice's text untouched. Any service exposing an
//! OpenAI-compatible `/chat/completions` endpoint can be targeted by changing
//! [`HttpClassifierConfig::base_url`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use kindred_core::InterestExtractor;
//! use kindred_data::classify::{HttpClassifier, HttpClassifierConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClassifierConfig::new("sk-test")
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(20));
//! let extractor = InterestExtractor::new(HttpClassifier::with_config(config)?);
//! let vector = extractor.extract("Board games and long walks.").await;
//! println!("{}", serde_json::to_string(&vector)?);
//! # Ok(())
//! # }
//! ```

mod openai;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_USER_AGENT, HttpClassifier,
    HttpClassifierConfig, ProviderBuildError,
};
