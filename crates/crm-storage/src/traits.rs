//! The [`Storage`] trait -- the public API for document persistence.
//!
//! Consumers depend on this trait rather than on [`SqliteStore`](crate::SqliteStore)
//! so that alternative backends can be substituted in tests.

use crm_core::fields::Fields;

use crate::error::Result;

/// A schema-less document store with one collection per entity kind.
///
/// The store owns the `_id`, `createdAt` and `updatedAt` keys of every
/// document: values supplied by callers for those keys are discarded.
pub trait Storage: Send + Sync {
    /// Inserts a new document, assigning its id and both timestamps.
    fn insert(&self, collection: &str, doc: Fields) -> Result<Fields>;

    /// Fetches one document by id.
    fn get(&self, collection: &str, id: &str) -> Result<Fields>;

    /// Returns every document, newest created first.
    fn list(&self, collection: &str) -> Result<Vec<Fields>>;

    /// Replaces the body of an existing document and refreshes `updatedAt`.
    ///
    /// The new `updatedAt` is strictly later than the previous one.
    fn replace(&self, collection: &str, id: &str, doc: Fields) -> Result<Fields>;

    /// Removes a document.
    fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
