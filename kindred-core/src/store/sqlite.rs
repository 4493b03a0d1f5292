//! SQLite-backed vector store.
//!
//! Vectors live in a single table keyed by user id. Scores are stored as the
//! JSON object produced by [`InterestVector`]'s serde impl, so rows stay
//! readable with the `sqlite3` shell and survive category-count checks on load.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::{InterestVector, UserId, UserIdError};

use super::VectorStore;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS interest_vectors (
    user_id TEXT PRIMARY KEY NOT NULL,
    scores TEXT NOT NULL
)";

/// Errors raised by [`SqliteVectorStore`].
#[derive(Debug, Error)]
pub enum SqliteVectorStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored score payload did not decode to a complete vector.
    #[error("stored interest vector for user '{user}' is corrupt: {source}")]
    CorruptVector {
        /// Identifier of the row that failed to decode.
        user: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored user id was blank.
    #[error("stored user id '{raw}' is invalid: {source}")]
    InvalidUserId {
        /// The raw identifier found in the table.
        raw: String,
        /// Validation failure.
        #[source]
        source: UserIdError,
    },
    /// Encoding a vector for storage failed.
    #[error("failed to encode interest vector for user '{user}': {source}")]
    Encode {
        /// Identifier of the vector being saved.
        user: String,
        /// JSON encoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Generic SQLite error when reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-write vector store backed by a SQLite database.
pub struct SqliteVectorStore {
    connection: Connection,
    path: Option<PathBuf>,
}

impl fmt::Debug for SqliteVectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteVectorStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteVectorStore {
    /// Open (creating when absent) the database at `path`.
    ///
    /// # Errors
    /// Returns [`SqliteVectorStoreError::OpenDatabase`] when the file cannot be
    /// opened, or [`SqliteVectorStoreError::Database`] when the schema cannot
    /// be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteVectorStoreError> {
        let location = path.as_ref();
        let connection =
            Connection::open(location).map_err(|source| SqliteVectorStoreError::OpenDatabase {
                path: location.to_path_buf(),
                source,
            })?;
        Self::initialise(connection, Some(location.to_path_buf()))
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns [`SqliteVectorStoreError::Database`] when SQLite fails.
    pub fn open_in_memory() -> Result<Self, SqliteVectorStoreError> {
        Self::initialise(Connection::open_in_memory()?, None)
    }

    /// Location of the backing file, or `None` for in-memory stores.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialise(
        connection: Connection,
        path: Option<PathBuf>,
    ) -> Result<Self, SqliteVectorStoreError> {
        connection.execute(CREATE_TABLE, [])?;
        Ok(Self { connection, path })
    }
}

fn decode_scores(user: &str, scores: &str) -> Result<InterestVector, SqliteVectorStoreError> {
    serde_json::from_str(scores).map_err(|source| SqliteVectorStoreError::CorruptVector {
        user: user.to_owned(),
        source,
    })
}

impl VectorStore for SqliteVectorStore {
    type Error = SqliteVectorStoreError;

    fn load(&self, user: &UserId) -> Result<Option<InterestVector>, Self::Error> {
        let scores: Option<String> = self
            .connection
            .query_row(
                "SELECT scores FROM interest_vectors WHERE user_id = ?1",
                params![user.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        scores
            .map(|payload| decode_scores(user.as_str(), &payload))
            .transpose()
    }

    fn save(&self, user: &UserId, vector: &InterestVector) -> Result<(), Self::Error> {
        let scores =
            serde_json::to_string(vector).map_err(|source| SqliteVectorStoreError::Encode {
                user: user.to_string(),
                source,
            })?;
        self.connection.execute(
            "INSERT INTO interest_vectors (user_id, scores) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET scores = excluded.scores",
            params![user.as_str(), scores],
        )?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<(UserId, InterestVector)>, Self::Error> {
        let mut statement = self
            .connection
            .prepare("SELECT user_id, scores FROM interest_vectors ORDER BY user_id")?;
        let mut rows = statement.query([])?;
        let mut vectors = Vec::new();

        while let Some(row) = rows.next()? {
            let raw_id: String = row.get(0)?;
            let scores: String = row.get(1)?;
            let vector = decode_scores(&raw_id, &scores)?;
            let user = UserId::new(raw_id.clone())
                .map_err(|source| SqliteVectorStoreError::InvalidUserId { raw: raw_id, source })?;
            vectors.push((user, vector));
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InterestCategory;
    use crate::test_support::write_raw_vector_row;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn user(id: &str) -> UserId {
        id.parse().expect("valid id")
    }

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    #[rstest]
    fn missing_user_loads_none() {
        let store = SqliteVectorStore::open_in_memory().expect("open store");
        assert!(store.load(&user("nobody")).expect("query").is_none());
        assert!(store.path().is_none());
    }

    #[rstest]
    fn save_then_load_returns_same_vector() {
        let store = SqliteVectorStore::open_in_memory().expect("open store");
        let vector = InterestVector::new()
            .with_score(InterestCategory::Hiking, 10)
            .with_score(InterestCategory::Photography, 6);
        store.save(&user("alice"), &vector).expect("save");
        assert_eq!(store.load(&user("alice")).expect("load"), Some(vector));
    }

    #[rstest]
    fn save_replaces_previous_vector() {
        let store = SqliteVectorStore::open_in_memory().expect("open store");
        let first = InterestVector::new().with_score(InterestCategory::Hiking, 10);
        let second = InterestVector::new().with_score(InterestCategory::Gaming, 3);
        store.save(&user("alice"), &first).expect("save first");
        store.save(&user("alice"), &second).expect("save second");
        assert_eq!(store.load(&user("alice")).expect("load"), Some(second));
        assert_eq!(store.load_all().expect("load all").len(), 1);
    }

    #[rstest]
    fn vectors_persist_across_reopen(temp_dir: TempDir) {
        let path = temp_dir.path().join("vectors.db");
        let vector = InterestVector::new().with_score(InterestCategory::Comedy, 5);
        {
            let store = SqliteVectorStore::open(&path).expect("open store");
            store.save(&user("bob"), &vector).expect("save");
        }
        let reopened = SqliteVectorStore::open(&path).expect("reopen store");
        assert_eq!(reopened.load(&user("bob")).expect("load"), Some(vector));
        assert_eq!(reopened.path(), Some(path.as_path()));
    }

    #[rstest]
    fn corrupt_rows_name_the_user(temp_dir: TempDir) {
        let path = temp_dir.path().join("vectors.db");
        let store = SqliteVectorStore::open(&path).expect("open store");
        write_raw_vector_row(&path, "mallory", r#"{"adventure": 4}"#).expect("write row");

        let err = store.load(&user("mallory")).expect_err("incomplete row");
        assert!(matches!(err, SqliteVectorStoreError::CorruptVector { ref user, .. } if user == "mallory"));
        assert!(store.load_all().is_err());
    }

    #[rstest]
    fn open_reports_unusable_path(temp_dir: TempDir) {
        let path = temp_dir.path().join("missing").join("vectors.db");
        let err = SqliteVectorStore::open(&path).expect_err("parent directory is missing");
        assert!(matches!(err, SqliteVectorStoreError::OpenDatabase { .. }));
    }
}
