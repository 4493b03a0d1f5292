use std::time::Duration;

use thiserror::Error;

/// Errors from [`crate::classifier::Classifier::classify`].
///
/// The extractor never surfaces these to its callers; they are logged and
/// replaced by the default vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// The call did not complete within the configured bound.
    #[error("classification timed out after {timeout:?}")]
    Timeout {
        /// The bound that elapsed.
        timeout: Duration,
    },
    /// The service could not be reached.
    #[error("failed to reach classification service at {url}: {message}")]
    Network {
        /// Endpoint that was contacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("classification service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Endpoint that was contacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported an error in its response body.
    #[error("classification service error: {message}")]
    Service {
        /// Message supplied by the service.
        message: String,
    },
    /// The response envelope could not be decoded.
    #[error("failed to decode classification response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service answered without any completion text.
    #[error("classification service returned no content")]
    EmptyResponse,
}
