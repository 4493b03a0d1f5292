//! Order candidates by compatibility with a subject.
//!
//! Scores are computed independently per candidate, optionally in parallel
//! with `rayon`, and collected in input order before a single stable sort.
//! Parallelism therefore never changes the output.

use kindred_core::{CompatibilityScore, InterestVector, UserId};
use rayon::prelude::*;

use crate::compatibility;

/// Candidate count at which [`RankerConfig::default`] switches to parallel scoring.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Tuning for [`CompatibilityRanker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerConfig {
    /// Candidate sets at least this large are scored on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl RankerConfig {
    /// Never score in parallel.
    #[must_use]
    pub const fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Always score in parallel, even for tiny candidate sets.
    #[must_use]
    pub const fn parallel() -> Self {
        Self {
            parallel_threshold: 0,
        }
    }

    /// Override the parallel threshold.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

/// Ranks candidate vectors against a subject.
///
/// Ranking does not filter the subject out of `candidates`; callers that
/// assemble candidates themselves must exclude the subject's own id.
/// [`crate::rank_for_user`] does this for store-backed ranking.
///
/// # Examples
/// ```
/// use kindred_core::{InterestCategory, InterestVector, UserId};
/// use kindred_scorer::{CompatibilityRanker, RankerConfig};
///
/// let hiker = InterestVector::new().with_score(InterestCategory::Hiking, 10);
/// let gamer = InterestVector::new().with_score(InterestCategory::Gaming, 10);
/// let candidates = vec![
///     ("gamer".parse::<UserId>()?, gamer),
///     ("hiker".parse::<UserId>()?, hiker),
/// ];
///
/// let ranker = CompatibilityRanker::new(RankerConfig::parallel());
/// let ranked = ranker.rank(&hiker, &candidates);
/// assert_eq!(ranked[0].candidate.as_str(), "hiker");
/// # Ok::<(), kindred_core::UserIdError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityRanker {
    config: RankerConfig,
}

impl CompatibilityRanker {
    /// Build a ranker with explicit tuning.
    #[must_use]
    pub const fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Borrow the active configuration.
    #[must_use]
    pub const fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Score every candidate and sort by descending compatibility.
    ///
    /// Ties keep their input order. An empty candidate set yields an empty
    /// ranking.
    #[must_use]
    pub fn rank(
        &self,
        subject: &InterestVector,
        candidates: &[(UserId, InterestVector)],
    ) -> Vec<CompatibilityScore> {
        let score = |(candidate, vector): &(UserId, InterestVector)| {
            CompatibilityScore::new(candidate.clone(), compatibility(subject, vector))
        };

        let mut ranked: Vec<CompatibilityScore> =
            if candidates.len() >= self.config.parallel_threshold {
                candidates.par_iter().map(score).collect()
            } else {
                candidates.iter().map(score).collect()
            };

        ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
        ranked
    }
}

/// Rank `candidates` against `subject` with the default ranker.
///
/// # Examples
/// ```
/// use kindred_core::{InterestVector, UserId};
/// use kindred_scorer::rank_compatibility;
///
/// assert!(rank_compatibility(&InterestVector::new(), &[]).is_empty());
/// ```
#[must_use]
pub fn rank_compatibility(
    subject: &InterestVector,
    candidates: &[(UserId, InterestVector)],
) -> Vec<CompatibilityScore> {
    CompatibilityRanker::default().rank(subject, candidates)
}
