//! Ranked compatibility results.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// One candidate's compatibility with a subject.
///
/// Scores from the same ranking call are comparable with each other. The raw
/// scale grows with the number of categories and is not a percentage; callers
/// that display one must rescale it themselves.
///
/// Serialises as `{"userId": …, "compatibility": …}`.
///
/// # Examples
/// ```
/// use kindred_core::{CompatibilityScore, UserId};
///
/// let score = CompatibilityScore::new("bob".parse::<UserId>()?, 120.5);
/// let json = serde_json::to_string(&score)?;
/// assert_eq!(json, r#"{"userId":"bob","compatibility":120.5}"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    /// The candidate being scored.
    #[serde(rename = "userId")]
    pub candidate: UserId,
    /// Summed similarity against the subject.
    #[serde(rename = "compatibility")]
    pub score: f64,
}

impl CompatibilityScore {
    /// Pair a candidate with its score.
    #[must_use]
    pub const fn new(candidate: UserId, score: f64) -> Self {
        Self { candidate, score }
    }
}
