//! Turn free-text self-descriptions into interest vectors.
//!
//! The extractor wraps a [`Classifier`] and owns everything the classifier
//! does not: bounding the call, decoding the raw answer and filling gaps.
//! Every failure path resolves to [`InterestVector::default`], so a
//! classification outage degrades fidelity without breaking submission.

use std::time::Duration;

use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

use crate::{ClassificationRequest, Classifier, ClassifierError, InterestCategory, InterestVector};

/// Default bound on a single classifier call.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on description length, in characters.
pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 1000;

/// Tuning for [`InterestExtractor`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use kindred_core::ExtractorConfig;
///
/// let config = ExtractorConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_max_description_chars(280);
/// assert_eq!(config.max_description_chars, 280);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Upper bound on a classifier call.
    pub timeout: Duration,
    /// Descriptions longer than this are truncated before classification.
    pub max_description_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CLASSIFY_TIMEOUT,
            max_description_chars: DEFAULT_MAX_DESCRIPTION_CHARS,
        }
    }
}

impl ExtractorConfig {
    /// Override the classifier timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the description length cap.
    #[must_use]
    pub const fn with_max_description_chars(mut self, max: usize) -> Self {
        self.max_description_chars = max;
        self
    }
}

/// Reasons a classifier answer could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseParseError {
    /// The answer held no parseable JSON.
    #[error("classifier response is not valid JSON: {message}")]
    InvalidJson {
        /// Decoder error description.
        message: String,
    },
    /// The answer was JSON, but not an object keyed by category.
    #[error("classifier response is a JSON {found}, expected an object")]
    NotAnObject {
        /// The JSON type that was found.
        found: &'static str,
    },
}

/// Why an extraction fell back to the default vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultReason {
    /// The description was empty or whitespace, so no call was made.
    #[error("description is blank")]
    BlankDescription,
    /// The classifier failed or timed out.
    #[error(transparent)]
    Classifier(ClassifierError),
    /// The classifier answered with something that could not be decoded.
    #[error(transparent)]
    Malformed(ResponseParseError),
}

/// Result of [`InterestExtractor::extract_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The classifier answered and its ratings were decoded.
    ///
    /// Individual categories may still hold the default when the answer
    /// omitted them or rated them with something non-numeric.
    Classified(InterestVector),
    /// No usable answer was obtained.
    Defaulted {
        /// What went wrong.
        reason: DefaultReason,
    },
}

impl ExtractionOutcome {
    /// Return the vector to store, defaulted when classification failed.
    #[must_use]
    pub fn vector(&self) -> InterestVector {
        match self {
            Self::Classified(vector) => *vector,
            Self::Defaulted { .. } => InterestVector::default(),
        }
    }

    /// Report whether the classifier produced the vector.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }
}

/// Produce interest vectors from self-descriptions using a [`Classifier`].
///
/// # Examples
/// ```
/// use kindred_core::{InterestCategory, InterestExtractor, test_support::StubClassifier};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let classifier = StubClassifier::with_response(r#"```json
/// {"hiking": 9, "gaming": "high"}
/// ```"#);
/// let extractor = InterestExtractor::new(classifier);
/// let vector = extractor.extract("Weekends are for the hills.").await;
/// assert_eq!(vector.score(InterestCategory::Hiking), 9);
/// assert_eq!(vector.score(InterestCategory::Gaming), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InterestExtractor<C> {
    classifier: C,
    config: ExtractorConfig,
}

impl<C: Classifier> InterestExtractor<C> {
    /// Build an extractor with [`ExtractorConfig::default`].
    pub fn new(classifier: C) -> Self {
        Self::with_config(classifier, ExtractorConfig::default())
    }

    /// Build an extractor with explicit tuning.
    pub const fn with_config(classifier: C, config: ExtractorConfig) -> Self {
        Self { classifier, config }
    }

    /// Borrow the active configuration.
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Borrow the wrapped classifier.
    pub const fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify `description` into a complete interest vector.
    ///
    /// Never fails: any problem yields the all-minimum default vector.
    pub async fn extract(&self, description: &str) -> InterestVector {
        self.extract_detailed(description).await.vector()
    }

    /// Classify `description`, reporting whether the vector was defaulted.
    pub async fn extract_detailed(&self, description: &str) -> ExtractionOutcome {
        if description.trim().is_empty() {
            debug!("blank description; using default interest vector");
            return ExtractionOutcome::Defaulted {
                reason: DefaultReason::BlankDescription,
            };
        }

        let text = truncate_chars(description, self.config.max_description_chars);
        let request = ClassificationRequest::new(text);
        let timeout = self.config.timeout;
        let response =
            match tokio::time::timeout(timeout, self.classifier.classify(&request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(err)) => {
                    warn!("interest classification failed, using default vector: {err}");
                    return ExtractionOutcome::Defaulted {
                        reason: DefaultReason::Classifier(err),
                    };
                }
                Err(_) => {
                    let err = ClassifierError::Timeout { timeout };
                    warn!("interest classification failed, using default vector: {err}");
                    return ExtractionOutcome::Defaulted {
                        reason: DefaultReason::Classifier(err),
                    };
                }
            };

        match parse_interest_response(&response) {
            Ok(vector) => ExtractionOutcome::Classified(vector),
            Err(err) => {
                warn!("discarding malformed classifier response: {err}");
                ExtractionOutcome::Defaulted {
                    reason: DefaultReason::Malformed(err),
                }
            }
        }
    }
}

/// Decode a classifier answer into a complete vector.
///
/// Markdown code fences are removed first. If the remainder is not JSON, the
/// outermost `{ … }` slice is tried, which recovers answers wrapped in prose.
/// Keys are matched to categories by wire name; extra keys are ignored.
/// Numbers and numeric strings are rounded and clamped into `1..=10`; any
/// other value, and any absent category, becomes the default score.
///
/// # Errors
/// Returns [`ResponseParseError`] when no JSON object can be recovered.
///
/// # Examples
/// ```
/// use kindred_core::{parse_interest_response, InterestCategory};
///
/// let vector = parse_interest_response(
///     r#"{"adventure": 15, "creativity": "high", "fitness": 7}"#,
/// )?;
/// assert_eq!(vector.score(InterestCategory::Adventure), 10);
/// assert_eq!(vector.score(InterestCategory::Creativity), 1);
/// assert_eq!(vector.score(InterestCategory::Fitness), 7);
/// # Ok::<(), kindred_core::ResponseParseError>(())
/// ```
pub fn parse_interest_response(raw: &str) -> Result<InterestVector, ResponseParseError> {
    let cleaned = strip_fences(raw);
    let value = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => value,
        Err(err) => outermost_object(&cleaned)
            .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
            .ok_or_else(|| ResponseParseError::InvalidJson {
                message: err.to_string(),
            })?,
    };

    let Value::Object(ratings) = value else {
        return Err(ResponseParseError::NotAnObject {
            found: json_type_name(&value),
        });
    };

    let mut vector = InterestVector::default();
    for category in InterestCategory::ALL {
        if let Some(raw_score) = ratings.get(category.as_str()).and_then(numeric_rating) {
            vector.set_score(category, InterestVector::score_from_raw(raw_score));
        }
    }
    Ok(vector)
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_owned()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    text.get(start..=end)
}

/// Read a rating from a JSON number or numeric string.
///
/// Only finite values count, so `"inf"` and `"NaN"` leave the default in
/// place. A numeric literal outside the `f64` range, such as `1e400`, makes
/// `serde_json` reject the whole response, and every category defaults.
fn numeric_rating(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    rating.filter(|score| score.is_finite())
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text.get(..cut).unwrap_or(text),
        None => text,
    }
}
