//! Storage backend for the crm system.
//!
//! Provides the [`Storage`] trait and a SQLite implementation ([`SqliteStore`]).

pub mod error;
pub mod sqlite;
pub mod traits;

// Re-exports for convenience.
pub use error::StorageError;
pub use sqlite::SqliteStore;
pub use traits::Storage;

// ---------------------------------------------------------------------------
// Storage trait implementation for SqliteStore
// ---------------------------------------------------------------------------

use crm_core::fields::Fields;

use crate::error::Result;

impl Storage for SqliteStore {
    fn insert(&self, collection: &str, doc: Fields) -> Result<Fields> {
        self.insert_impl(collection, doc)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Fields> {
        self.get_impl(collection, id)
    }

    fn list(&self, collection: &str) -> Result<Vec<Fields>> {
        self.list_impl(collection)
    }

    fn replace(&self, collection: &str, id: &str, doc: Fields) -> Result<Fields> {
        self.replace_impl(collection, id, doc)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.delete_impl(collection, id)
    }
}
