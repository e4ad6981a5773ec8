//! SQLite-backed storage implementation.

mod documents;
pub mod schema;
mod store;

pub use store::SqliteStore;
