//! Per-category similarity and whole-vector compatibility.

use kindred_core::InterestVector;

/// Contribution weight of a perfect per-category match, before scaling.
pub const PERFECT_MATCH: i32 = 100;

/// Score one category.
///
/// `(100 - (subject - candidate)²) * sqrt(subject)`. The term stays positive
/// across the `1..=10` domain (worst case `19 * sqrt(subject)`) and is scaled
/// by the subject's own rating, so categories the subject cares about weigh
/// more in both agreement and disagreement. The function is deliberately not
/// symmetric in its arguments.
///
/// # Examples
/// ```
/// use kindred_scorer::similarity_term;
///
/// assert_eq!(similarity_term(4, 4), 200.0);
/// assert_eq!(similarity_term(1, 10), 19.0);
/// assert_ne!(similarity_term(10, 1), similarity_term(1, 10));
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the weighting is defined in terms of a square root"
)]
#[must_use]
pub fn similarity_term(subject: u8, candidate: u8) -> f64 {
    let diff = i32::from(subject) - i32::from(candidate);
    f64::from(PERFECT_MATCH - diff * diff) * f64::from(subject).sqrt()
}

/// Sum [`similarity_term`] over every category, positionally.
///
/// # Examples
/// ```
/// use kindred_core::{InterestVector, CATEGORY_COUNT};
/// use kindred_scorer::compatibility;
///
/// let everyone = InterestVector::new();
/// let score = compatibility(&everyone, &everyone);
/// assert_eq!(score, 100.0 * CATEGORY_COUNT as f64);
/// ```
#[must_use]
pub fn compatibility(subject: &InterestVector, candidate: &InterestVector) -> f64 {
    subject
        .scores()
        .iter()
        .zip(candidate.scores())
        .map(|(&own, &theirs)| similarity_term(own, theirs))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::{CATEGORY_COUNT, InterestCategory, MAX_SCORE, MIN_SCORE};
    use rstest::rstest;

    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(10, 10, 316.227_766_016_837_96)]
    #[case(10, 1, 60.083_275_543_199_214)]
    #[case(1, 10, 19.0)]
    #[case(5, 3, 214.662_525_839_979_82)]
    #[case(1, 1, 100.0)]
    fn terms_follow_weighted_penalty(#[case] subject: u8, #[case] candidate: u8, #[case] expected: f64) {
        assert_close(similarity_term(subject, candidate), expected);
    }

    #[rstest]
    fn terms_stay_positive_across_domain() {
        for subject in MIN_SCORE..=MAX_SCORE {
            for candidate in MIN_SCORE..=MAX_SCORE {
                assert!(similarity_term(subject, candidate) > 0.0);
            }
        }
    }

    #[rstest]
    fn identical_vectors_score_highest_for_subject() {
        let subject = InterestVector::new()
            .with_score(InterestCategory::Hiking, 9)
            .with_score(InterestCategory::Reading, 4);
        let near = subject.with_score(InterestCategory::Reading, 5);
        assert!(compatibility(&subject, &subject) > compatibility(&subject, &near));
    }

    #[rstest]
    fn all_minimum_vectors_score_one_hundred_per_category() {
        assert_eq!(CATEGORY_COUNT, 30);
        let vector = InterestVector::new();
        assert_close(compatibility(&vector, &vector), 3000.0);
    }
}
