//! Store-backed ranking for a single subject.

use kindred_core::{CompatibilityScore, UserId, VectorStore};
use log::debug;

use crate::{CompatibilityRanker, RankError};

impl CompatibilityRanker {
    /// Rank every other stored user against `user`.
    ///
    /// Candidates are loaded in user-id order and the subject's own entry is
    /// excluded, so tied scores come out in user-id order.
    ///
    /// # Errors
    /// Returns [`RankError::MissingSubject`] when `user` has no stored
    /// vector, or [`RankError::Store`] when the store fails.
    pub fn rank_for_user<S>(
        &self,
        store: &S,
        user: &UserId,
    ) -> Result<Vec<CompatibilityScore>, RankError>
    where
        S: VectorStore + ?Sized,
    {
        let subject = store
            .load(user)
            .map_err(RankError::store)?
            .ok_or_else(|| RankError::MissingSubject { user: user.clone() })?;

        let mut candidates = store.load_all().map_err(RankError::store)?;
        candidates.retain(|(candidate, _)| candidate != user);
        debug!("ranking {} candidates for user '{user}'", candidates.len());

        Ok(self.rank(&subject, &candidates))
    }
}

/// Rank every other stored user against `user` with the default ranker.
///
/// # Errors
/// See [`CompatibilityRanker::rank_for_user`].
///
/// # Examples
/// ```
/// use kindred_core::{InterestCategory, InterestVector, UserId, VectorStore};
/// use kindred_core::test_support::MemoryVectorStore;
/// use kindred_scorer::{RankError, rank_for_user};
///
/// let store = MemoryVectorStore::default();
/// let me: UserId = "me".parse()?;
/// let you: UserId = "you".parse()?;
/// store.save(&me, &InterestVector::new().with_score(InterestCategory::Travel, 9))?;
/// store.save(&you, &InterestVector::new())?;
///
/// let ranked = rank_for_user(&store, &me)?;
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].candidate, you);
///
/// let stranger: UserId = "stranger".parse()?;
/// assert!(matches!(
///     rank_for_user(&store, &stranger),
///     Err(RankError::MissingSubject { .. })
/// ));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn rank_for_user<S>(store: &S, user: &UserId) -> Result<Vec<CompatibilityScore>, RankError>
where
    S: VectorStore + ?Sized,
{
    CompatibilityRanker::default().rank_for_user(store, user)
}
