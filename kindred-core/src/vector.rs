//! Interest vectors: one integer score in `1..=10` for every category.
//!
//! A vector is stored positionally, following [`InterestCategory::ALL`], so an
//! incomplete vector cannot be represented. Scores never drop below
//! [`MIN_SCORE`]; the similarity term takes the square root of the subject's
//! score and a zero would erase the category's contribution.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;

use crate::{CATEGORY_COUNT, InterestCategory, UserId};

/// Lowest score a category can hold.
pub const MIN_SCORE: u8 = 1;

/// Highest score a category can hold.
pub const MAX_SCORE: u8 = 10;

/// Score used when a value is missing or unusable.
pub const DEFAULT_SCORE: u8 = MIN_SCORE;

/// Errors returned by [`InterestVector::try_from_scores`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InterestVectorError {
    /// A category had no score.
    #[error("interest vector is missing a score for '{category}'")]
    MissingCategory {
        /// The category without a score.
        category: InterestCategory,
    },
    /// A score fell outside `1..=10`.
    #[error("score {value} for '{category}' is outside 1..=10")]
    OutOfRange {
        /// The category holding the bad score.
        category: InterestCategory,
        /// The rejected value.
        value: i64,
    },
    /// A key did not name a known category.
    #[error("unknown interest category '{name}'")]
    UnknownCategory {
        /// The unrecognised key.
        name: String,
    },
}

/// A complete mapping from every category to a score in `1..=10`.
///
/// # Examples
/// ```
/// use kindred_core::{InterestCategory, InterestVector, DEFAULT_SCORE};
///
/// let vector = InterestVector::new()
///     .with_score(InterestCategory::Hiking, 9)
///     .with_score(InterestCategory::Gaming, 42);
/// assert_eq!(vector.score(InterestCategory::Hiking), 9);
/// assert_eq!(vector.score(InterestCategory::Gaming), 10);
/// assert_eq!(vector.score(InterestCategory::Reading), DEFAULT_SCORE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterestVector {
    scores: [u8; CATEGORY_COUNT],
}

impl Default for InterestVector {
    fn default() -> Self {
        Self {
            scores: [DEFAULT_SCORE; CATEGORY_COUNT],
        }
    }
}

impl InterestVector {
    /// Construct a vector with every category at [`DEFAULT_SCORE`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the score for `category`.
    #[must_use]
    pub fn score(&self, category: InterestCategory) -> u8 {
        self.scores
            .get(category.index())
            .copied()
            .unwrap_or(DEFAULT_SCORE)
    }

    /// Set the score for `category`, clamping into `1..=10`.
    pub(crate) fn set_score(&mut self, category: InterestCategory, score: u8) {
        if let Some(slot) = self.scores.get_mut(category.index()) {
            *slot = score.clamp(MIN_SCORE, MAX_SCORE);
        }
    }

    /// Set a score while returning `self` for chaining.
    ///
    /// This is the only public way to change a score; callers cannot edit a
    /// vector in place.
    ///
    /// ```compile_fail
    /// use kindred_core::{InterestCategory, InterestVector};
    ///
    /// let mut vector = InterestVector::new();
    /// vector.set_score(InterestCategory::Music, 8);
    /// ```
    #[must_use]
    pub fn with_score(mut self, category: InterestCategory, score: u8) -> Self {
        self.set_score(category, score);
        self
    }

    /// Return the scores in positional order.
    #[must_use]
    pub const fn scores(&self) -> &[u8; CATEGORY_COUNT] {
        &self.scores
    }

    /// Iterate over `(category, score)` pairs in positional order.
    pub fn iter(&self) -> impl Iterator<Item = (InterestCategory, u8)> + '_ {
        InterestCategory::ALL.into_iter().zip(self.scores.iter().copied())
    }

    /// Report whether every category still holds [`DEFAULT_SCORE`].
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.scores.iter().all(|&score| score == DEFAULT_SCORE)
    }

    /// Round a raw numeric rating to the nearest integer and clamp it.
    ///
    /// NaN has no nearest integer and yields [`DEFAULT_SCORE`].
    ///
    /// # Examples
    /// ```
    /// use kindred_core::InterestVector;
    ///
    /// assert_eq!(InterestVector::score_from_raw(6.5), 7);
    /// assert_eq!(InterestVector::score_from_raw(15.0), 10);
    /// assert_eq!(InterestVector::score_from_raw(-3.0), 1);
    /// assert_eq!(InterestVector::score_from_raw(f64::NAN), 1);
    /// ```
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the value is rounded and clamped into 1..=10 before the cast"
    )]
    #[must_use]
    pub fn score_from_raw(raw: f64) -> u8 {
        if raw.is_nan() {
            return DEFAULT_SCORE;
        }
        raw.round()
            .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
    }

    /// Build a vector from named scores, rejecting anything incomplete.
    ///
    /// Used when reading persisted vectors, where a gap signals corruption
    /// rather than a lukewarm interest.
    ///
    /// # Errors
    /// Returns [`InterestVectorError`] when a key is unknown, a score is out
    /// of range, or a category is missing.
    pub fn try_from_scores<I, K>(scores: I) -> Result<Self, InterestVectorError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut slots: [Option<u8>; CATEGORY_COUNT] = [None; CATEGORY_COUNT];
        for (name, value) in scores {
            let category: InterestCategory =
                name.as_ref()
                    .parse()
                    .map_err(|_| InterestVectorError::UnknownCategory {
                        name: name.as_ref().to_owned(),
                    })?;
            let score = u8::try_from(value)
                .ok()
                .filter(|score| (MIN_SCORE..=MAX_SCORE).contains(score))
                .ok_or(InterestVectorError::OutOfRange { category, value })?;
            if let Some(slot) = slots.get_mut(category.index()) {
                *slot = Some(score);
            }
        }

        let mut vector = Self::default();
        for (category, slot) in InterestCategory::ALL.into_iter().zip(slots) {
            let score = slot.ok_or(InterestVectorError::MissingCategory { category })?;
            vector.set_score(category, score);
        }
        Ok(vector)
    }

    /// Render the export tuple `[user_id, score_1, …, score_30]`.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::{InterestVector, UserId, CATEGORY_COUNT};
    ///
    /// let user: UserId = "alice".parse()?;
    /// let row = InterestVector::new().to_row(&user);
    /// assert_eq!(row.len(), CATEGORY_COUNT + 1);
    /// assert_eq!(row[0], "alice");
    /// # Ok::<(), kindred_core::UserIdError>(())
    /// ```
    #[must_use]
    pub fn to_row(&self, user: &UserId) -> Vec<serde_json::Value> {
        std::iter::once(serde_json::Value::from(user.as_str()))
            .chain(self.scores.iter().map(|&score| serde_json::Value::from(score)))
            .collect()
    }
}

impl Serialize for InterestVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CATEGORY_COUNT))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.as_str(), &score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InterestVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, i64>::deserialize(deserializer)?;
        Self::try_from_scores(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn full_scores(value: i64) -> Vec<(&'static str, i64)> {
        InterestCategory::ALL
            .iter()
            .map(|category| (category.as_str(), value))
            .collect()
    }

    #[rstest]
    fn default_vector_is_all_minimum() {
        let vector = InterestVector::new();
        assert!(vector.scores().iter().all(|&score| score == MIN_SCORE));
        assert!(vector.is_default());
    }

    #[rstest]
    #[case(0, MIN_SCORE)]
    #[case(5, 5)]
    #[case(11, MAX_SCORE)]
    #[case(u8::MAX, MAX_SCORE)]
    fn set_score_clamps(#[case] input: u8, #[case] expected: u8) {
        let mut vector = InterestVector::new();
        vector.set_score(InterestCategory::Music, input);
        assert_eq!(vector.score(InterestCategory::Music), expected);
    }

    #[rstest]
    fn with_score_leaves_the_source_vector_untouched() {
        let original = InterestVector::new().with_score(InterestCategory::Music, 4);
        let updated = original.with_score(InterestCategory::Music, 8);
        assert_eq!(original.score(InterestCategory::Music), 4);
        assert_eq!(updated.score(InterestCategory::Music), 8);
    }

    #[rstest]
    #[case(2.49, 2)]
    #[case(2.5, 3)]
    #[case(0.4, 1)]
    #[case(9.6, 10)]
    #[case(f64::INFINITY, 10)]
    #[case(f64::NEG_INFINITY, 1)]
    fn raw_scores_round_and_clamp(#[case] raw: f64, #[case] expected: u8) {
        assert_eq!(InterestVector::score_from_raw(raw), expected);
    }

    #[rstest]
    fn try_from_scores_accepts_complete_input() {
        let vector = InterestVector::try_from_scores(full_scores(4)).expect("complete scores");
        assert!(vector.scores().iter().all(|&score| score == 4));
    }

    #[rstest]
    fn try_from_scores_reports_missing_category() {
        let mut scores = full_scores(4);
        scores.retain(|(name, _)| *name != "pets");
        let err = InterestVector::try_from_scores(scores).expect_err("pets is missing");
        assert_eq!(
            err,
            InterestVectorError::MissingCategory {
                category: InterestCategory::Pets
            }
        );
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    #[case(-4)]
    fn try_from_scores_rejects_out_of_range(#[case] value: i64) {
        let mut scores = full_scores(4);
        scores.push(("travel", value));
        let err = InterestVector::try_from_scores(scores).expect_err("bad travel score");
        assert!(matches!(err, InterestVectorError::OutOfRange { value: v, .. } if v == value));
    }

    #[rstest]
    fn try_from_scores_rejects_unknown_keys() {
        let mut scores = full_scores(4);
        scores.push(("knitting", 3));
        let err = InterestVector::try_from_scores(scores).expect_err("unknown key");
        assert!(matches!(err, InterestVectorError::UnknownCategory { .. }));
    }

    #[rstest]
    fn serialises_as_object_in_category_order() {
        let vector = InterestVector::new().with_score(InterestCategory::Adventure, 7);
        let json = serde_json::to_string(&vector).expect("serialise vector");
        assert!(json.starts_with(r#"{"adventure":7,"creativity":1"#));
        assert!(json.ends_with(r#""gardening":1}"#));
    }

    #[rstest]
    fn deserialisation_is_strict() {
        let err = serde_json::from_str::<InterestVector>(r#"{"adventure":7}"#)
            .expect_err("incomplete vector must not decode");
        assert!(err.to_string().contains("missing a score"));
    }

    #[rstest]
    fn json_survives_storage_format() {
        let vector = InterestVector::new()
            .with_score(InterestCategory::Hiking, 9)
            .with_score(InterestCategory::BoardGames, 3);
        let json = serde_json::to_string(&vector).expect("serialise vector");
        let decoded: InterestVector = serde_json::from_str(&json).expect("decode vector");
        assert_eq!(decoded, vector);
    }

    #[rstest]
    fn row_lists_scores_after_user() {
        let user: UserId = "bob".parse().expect("valid id");
        let vector = InterestVector::new().with_score(InterestCategory::Gardening, 8);
        let row = vector.to_row(&user);
        assert_eq!(row.first(), Some(&serde_json::Value::from("bob")));
        assert_eq!(row.last(), Some(&serde_json::Value::from(8)));
    }
}
