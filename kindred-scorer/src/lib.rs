//! Compatibility scoring for Kindred interest vectors.
//!
//! The crate provides two layers:
//! - **Pure scoring**: [`similarity_term`] and [`compatibility`] compare two
//!   vectors category by category, and [`rank_compatibility`] orders a
//!   candidate set by descending score. No I/O, no hidden state.
//! - **Store-backed ranking**: [`rank_for_user`] resolves a subject and its
//!   candidates from a [`VectorStore`](kindred_core::VectorStore), excludes
//!   the subject itself, and ranks the rest.
//!
//! Scores are raw sums. They grow with the number of categories and with the
//! subject's own ratings, so only their relative order is meaningful.
//!
//! # Examples
//!
//! ```
//! use kindred_core::{InterestVector, UserId};
//! use kindred_scorer::rank_compatibility;
//!
//! let subject = InterestVector::new();
//! let candidates = vec![
//!     ("ana".parse::<UserId>()?, InterestVector::new()),
//! ];
//! let ranked = rank_compatibility(&subject, &candidates);
//! assert_eq!(ranked.len(), 1);
//! # Ok::<(), kindred_core::UserIdError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod ranker;
mod similarity;
mod user;

pub use error::RankError;
pub use ranker::{CompatibilityRanker, DEFAULT_PARALLEL_THRESHOLD, RankerConfig, rank_compatibility};
pub use similarity::{PERFECT_MATCH, compatibility, similarity_term};
pub use user::rank_for_user;
