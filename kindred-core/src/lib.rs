//! Core domain types for the Kindred interest-compatibility engine.
//!
//! The crate defines the closed category set, the interest vector built on
//! it, the classifier seam used to produce vectors from free text, and the
//! storage seam used to persist them. Scoring lives in `kindred-scorer`;
//! concrete HTTP classifiers live in `kindred-data`.
//!
//! Constructors and decoders validate eagerly so that every
//! [`InterestVector`] in circulation is complete and in range.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod category;
pub mod classifier;
mod compatibility;
mod extractor;
pub mod store;
#[doc(hidden)]
pub mod test_support;
mod user;
mod vector;

pub use category::{CATEGORY_COUNT, InterestCategory};
pub use classifier::{ClassificationRequest, Classifier, ClassifierError};
pub use compatibility::CompatibilityScore;
pub use extractor::{
    DEFAULT_CLASSIFY_TIMEOUT, DEFAULT_MAX_DESCRIPTION_CHARS, DefaultReason, ExtractionOutcome,
    ExtractorConfig, InterestExtractor, ResponseParseError, parse_interest_response,
};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteVectorStore, SqliteVectorStoreError};
pub use store::VectorStore;
pub use user::{UserId, UserIdError};
pub use vector::{DEFAULT_SCORE, InterestVector, InterestVectorError, MAX_SCORE, MIN_SCORE};
