//! Test helpers for temporary vector databases and stub classifiers.

use super::*;
use crate::extract::{ClassifierBuilder, ExtractConfig};
use camino::Utf8PathBuf;
use kindred_core::test_support::StubClassifier;
use kindred_core::{Classifier, ClassifierError, InterestCategory, InterestVector, VectorStore};
use tempfile::TempDir;

/// Temporary directory holding a vector database and any input files.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join("kindred.db")
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub(super) fn store(&self) -> SqliteVectorStore {
        SqliteVectorStore::open(self.database().as_std_path()).expect("open vector store")
    }

    pub(super) fn seed(&self, vectors: &[(&str, InterestVector)]) {
        let store = self.store();
        for (id, vector) in vectors {
            store.save(&user(id), vector).expect("seed vector");
        }
    }

    pub(super) fn stored(&self, id: &str) -> Option<InterestVector> {
        self.store().load(&user(id)).expect("load vector")
    }
}

pub(super) fn user(id: &str) -> UserId {
    id.parse().expect("valid user id")
}

pub(super) fn rating(category: InterestCategory, score: u8) -> InterestVector {
    InterestVector::new().with_score(category, score)
}

/// Builder handing out a [`StubClassifier`] with a fixed outcome.
#[derive(Debug, Clone)]
pub(super) struct StubClassifierBuilder {
    outcome: Result<String, ClassifierError>,
}

impl StubClassifierBuilder {
    pub(super) fn answering(response: &str) -> Self {
        Self {
            outcome: Ok(response.to_owned()),
        }
    }

    pub(super) fn failing(error: ClassifierError) -> Self {
        Self { outcome: Err(error) }
    }

    pub(super) fn unreachable() -> Self {
        Self::failing(ClassifierError::Network {
            url: "http://127.0.0.1:9/v1/chat/completions".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}

impl ClassifierBuilder for StubClassifierBuilder {
    fn build(&self, _config: &ExtractConfig) -> Result<Box<dyn Classifier>, CliError> {
        let classifier = match &self.outcome {
            Ok(response) => StubClassifier::with_response(response.clone()),
            Err(error) => StubClassifier::with_error(error.clone()),
        };
        Ok(Box::new(classifier))
    }
}
