//! Error types raised while ranking stored vectors.

use kindred_core::UserId;
use thiserror::Error;

/// Errors raised by store-backed ranking.
#[derive(Debug, Error)]
pub enum RankError {
    /// The subject has no stored vector.
    ///
    /// This is a caller precondition: look up or create the subject's vector
    /// before asking for matches.
    #[error("subject vector required: no interest vector stored for user '{user}'")]
    MissingSubject {
        /// The subject that was looked up.
        user: UserId,
    },
    /// Reading from the vector store failed.
    #[error("failed to read interest vectors: {source}")]
    Store {
        /// Source error from the store implementation.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RankError {
    pub(crate) fn store<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            source: Box::new(source),
        }
    }
}
