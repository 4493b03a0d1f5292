//! Facade crate for the Kindred interest-compatibility engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP
//! classifier, the compatibility ranker, and the SQLite vector store behind
//! feature flags.

#![forbid(unsafe_code)]

pub use kindred_core::{
    CATEGORY_COUNT, ClassificationRequest, Classifier, ClassifierError, CompatibilityScore,
    DEFAULT_SCORE, DefaultReason, ExtractionOutcome, ExtractorConfig, InterestCategory,
    InterestExtractor, InterestVector, InterestVectorError, MAX_SCORE, MIN_SCORE,
    ResponseParseError, UserId, UserIdError, VectorStore, parse_interest_response,
};

#[cfg(feature = "store-sqlite")]
pub use kindred_core::{SqliteVectorStore, SqliteVectorStoreError};

#[cfg(feature = "http-classifier")]
pub use kindred_data::{HttpClassifier, HttpClassifierConfig, ProviderBuildError};

#[cfg(feature = "scorer")]
pub use kindred_scorer::{
    CompatibilityRanker, RankError, RankerConfig, compatibility, rank_compatibility,
    rank_for_user,
};
