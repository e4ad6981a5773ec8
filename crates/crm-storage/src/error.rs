//! Storage error types.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested document was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The collection that was searched (e.g., "tasks").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The collection is not one of the registered collections.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// Failed to establish or maintain a database connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// Creating the tables failed.
    #[error("schema setup failed at {step}: {reason}")]
    Schema {
        /// The setup step that failed.
        step: &'static str,
        /// Underlying error description.
        reason: String,
    },

    /// A stored document could not be read back as a JSON object.
    #[error("corrupt document {id} in {collection}: {reason}")]
    Corrupt {
        collection: String,
        id: String,
        reason: String,
    },

    /// A raw SQLite query error.
    #[error("query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// JSON serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the storage crate.
pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Creates a [`StorageError::NotFound`] for the given collection and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Returns `true` if this is a [`StorageError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = StorageError::not_found("tasks", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "tasks not found: abc");
    }
}
