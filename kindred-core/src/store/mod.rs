//! Persistence seam for interest vectors.
//!
//! The engine does not own a storage engine; it needs one vector per user,
//! overwritten on every new description, and a bulk read of every vector when
//! ranking. [`VectorStore`] captures exactly that contract.

use crate::{InterestVector, UserId};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteVectorStore, SqliteVectorStoreError};

/// Keyed storage holding one [`InterestVector`] per user.
///
/// # Examples
///
/// ```rust
/// use kindred_core::{InterestCategory, InterestVector, UserId, VectorStore};
/// use kindred_core::test_support::MemoryVectorStore;
///
/// let store = MemoryVectorStore::default();
/// let alice: UserId = "alice".parse()?;
/// store.save(&alice, &InterestVector::new().with_score(InterestCategory::Music, 8))?;
/// store.save(&alice, &InterestVector::new())?;
///
/// let stored = store.load(&alice)?.expect("alice has a vector");
/// assert!(stored.is_default());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait VectorStore {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the vector stored for `user`, if any.
    fn load(&self, user: &UserId) -> Result<Option<InterestVector>, Self::Error>;

    /// Store `vector` for `user`, replacing any previous vector outright.
    fn save(&self, user: &UserId, vector: &InterestVector) -> Result<(), Self::Error>;

    /// Return every stored vector, ordered by user id.
    fn load_all(&self) -> Result<Vec<(UserId, InterestVector)>, Self::Error>;
}

impl<S: VectorStore + ?Sized> VectorStore for &S {
    type Error = S::Error;

    fn load(&self, user: &UserId) -> Result<Option<InterestVector>, Self::Error> {
        (**self).load(user)
    }

    fn save(&self, user: &UserId, vector: &InterestVector) -> Result<(), Self::Error> {
        (**self).save(user, vector)
    }

    fn load_all(&self) -> Result<Vec<(UserId, InterestVector)>, Self::Error> {
        (**self).load_all()
    }
}
