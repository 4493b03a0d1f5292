//! The text-classification capability consumed by the extractor.
//!
//! A [`Classifier`] turns a [`ClassificationRequest`] into raw response text.
//! It does not parse or validate that text; the extractor owns decoding and
//! defaulting so any backend, including a deterministic stub, can be swapped
//! in without touching that logic.

mod error;

use std::sync::Arc;

use async_trait::async_trait;

use crate::InterestCategory;

pub use error::ClassifierError;

/// A request to rate a self-description against a closed category list.
///
/// # Examples
/// ```
/// use kindred_core::ClassificationRequest;
///
/// let request = ClassificationRequest::new("I love hiking and cooking.");
/// let prompt = request.prompt();
/// assert!(prompt.contains("adventure, creativity, fitness"));
/// assert!(prompt.ends_with("Description: \"I love hiking and cooking.\"\n"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRequest<'a> {
    /// Categories to rate, in positional order.
    pub categories: &'a [InterestCategory],
    /// The user's free-text self-description.
    pub description: &'a str,
}

impl<'a> ClassificationRequest<'a> {
    /// Build a request covering every category.
    #[must_use]
    pub const fn new(description: &'a str) -> Self {
        Self {
            categories: &InterestCategory::ALL,
            description,
        }
    }

    /// Render the instruction sent to a language-model classifier.
    #[must_use]
    pub fn prompt(&self) -> String {
        let tags = self
            .categories
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let quoted = serde_json::Value::from(self.description).to_string();
        format!(
            "You are given a user's self-description.\n\
             Rate the user's likely interests for each tag on a scale of 1 (low) to 10 (high).\n\
             Respond ONLY in JSON with the keys exactly matching the following tags:\n\
             {tags}.\n\
             \n\
             Description: {quoted}\n"
        )
    }
}

/// Classify free text into per-category ratings.
///
/// Implementations return the service's raw answer, which is expected (but
/// not guaranteed) to be a JSON object keyed by category name. Implementations
/// must be `Send + Sync` so one classifier can serve concurrent submissions.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use kindred_core::{ClassificationRequest, Classifier, ClassifierError};
///
/// struct Enthusiast;
///
/// #[async_trait]
/// impl Classifier for Enthusiast {
///     async fn classify(
///         &self,
///         request: &ClassificationRequest<'_>,
///     ) -> Result<String, ClassifierError> {
///         let body = request
///             .categories
///             .iter()
///             .map(|c| format!("\"{c}\": 10"))
///             .collect::<Vec<_>>()
///             .join(",");
///         Ok(format!("{{{body}}}"))
///     }
/// }
/// ```
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Return the raw classification text for `request`.
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<String, ClassifierError>;
}

#[async_trait]
impl<C: Classifier + ?Sized> Classifier for Box<C> {
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<String, ClassifierError> {
        (**self).classify(request).await
    }
}

#[async_trait]
impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<String, ClassifierError> {
        (**self).classify(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn prompt_lists_every_category_in_order() {
        let prompt = ClassificationRequest::new("hello").prompt();
        let positions: Vec<usize> = InterestCategory::ALL
            .iter()
            .filter_map(|category| prompt.find(&format!("{category},")).or_else(|| prompt.find(&format!("{category}."))))
            .collect();
        assert_eq!(positions.len(), InterestCategory::ALL.len());
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest]
    fn prompt_escapes_description_quotes() {
        let prompt = ClassificationRequest::new(r#"I say "hi""#).prompt();
        assert!(prompt.contains(r#"Description: "I say \"hi\"""#));
    }

    #[rstest]
    fn request_defaults_to_full_category_set() {
        let request = ClassificationRequest::new("text");
        assert_eq!(request.categories, &InterestCategory::ALL);
    }
}
