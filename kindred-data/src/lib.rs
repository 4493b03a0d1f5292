//! Adapters connecting the Kindred engine to external services.
//!
//! Responsibilities:
//! - Provide [`Classifier`](kindred_core::Classifier) implementations backed
//!   by hosted language models.
//! - Encapsulate wire formats of those services.
//!
//! Boundaries:
//! - Do not decode or default interest ratings (that lives in
//!   `kindred-core`'s extractor).
//! - Keep blocking I/O off async executors; all HTTP calls are async.
//!
//! Invariants:
//! - Clients are `Send + Sync` and safe to share across tasks.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod classify;

pub use classify::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, HttpClassifier, HttpClassifierConfig, ProviderBuildError,
};
