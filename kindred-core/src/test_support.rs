//! Deterministic collaborators for unit and behaviour tests.
//!
//! [`StubClassifier`] replays a fixed answer (or error) and records the
//! descriptions it was asked about. [`MemoryVectorStore`] keeps vectors in a
//! `BTreeMap` so `load_all` is naturally ordered by user id.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ClassificationRequest, Classifier, ClassifierError, InterestVector, UserId, VectorStore};

/// Classifier returning a canned answer after an optional delay.
#[derive(Debug)]
pub struct StubClassifier {
    outcome: Result<String, ClassifierError>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl StubClassifier {
    /// Answer every request with `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::with_outcome(Ok(response.into()))
    }

    /// Fail every request with `error`.
    pub fn with_error(error: ClassifierError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, ClassifierError>) -> Self {
        Self {
            outcome,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Descriptions received so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<String, ClassifierError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.description.to_owned());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

/// In-memory `VectorStore` implementation used in tests.
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    vectors: RwLock<BTreeMap<UserId, InterestVector>>,
}

impl MemoryVectorStore {
    /// Create a store pre-populated with `vectors`.
    pub fn with_vectors<I>(vectors: I) -> Self
    where
        I: IntoIterator<Item = (UserId, InterestVector)>,
    {
        Self {
            vectors: RwLock::new(vectors.into_iter().collect()),
        }
    }
}

impl VectorStore for MemoryVectorStore {
    type Error = Infallible;

    fn load(&self, user: &UserId) -> Result<Option<InterestVector>, Self::Error> {
        let vectors = self.vectors.read().unwrap_or_else(PoisonError::into_inner);
        Ok(vectors.get(user).copied())
    }

    fn save(&self, user: &UserId, vector: &InterestVector) -> Result<(), Self::Error> {
        let mut vectors = self.vectors.write().unwrap_or_else(PoisonError::into_inner);
        vectors.insert(user.clone(), *vector);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<(UserId, InterestVector)>, Self::Error> {
        let vectors = self.vectors.read().unwrap_or_else(PoisonError::into_inner);
        Ok(vectors
            .iter()
            .map(|(user, vector)| (user.clone(), *vector))
            .collect())
    }
}

/// Insert a raw row into a SQLite vector database, bypassing validation.
///
/// Used to simulate rows written by older or foreign tooling.
#[cfg(feature = "store-sqlite")]
pub fn write_raw_vector_row(
    path: &std::path::Path,
    user: &str,
    scores: &str,
) -> Result<(), rusqlite::Error> {
    let connection = rusqlite::Connection::open(path)?;
    connection.execute(
        "INSERT OR REPLACE INTO interest_vectors (user_id, scores) VALUES (?1, ?2)",
        rusqlite::params![user, scores],
    )?;
    Ok(())
}
