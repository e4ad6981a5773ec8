//! DDL statements for the SQLite schema.
//!
//! Every record lives in one `documents` table as a JSON body, keyed by
//! `(collection, id)`. Timestamps are duplicated into TEXT columns in
//! `%Y-%m-%dT%H:%M:%S%.3fZ` format so that ordering can happen in SQL.
//! `seq` breaks ties between documents created in the same millisecond.
//! All statements are idempotent and run on every open.

/// DDL statements executed during `init_schema`.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    // -- Collections ---------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS collections (
        name TEXT PRIMARY KEY
    )
    "#,
    // -- Documents -----------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        seq         INTEGER PRIMARY KEY AUTOINCREMENT,
        collection  TEXT NOT NULL,
        id          TEXT NOT NULL,
        body        TEXT NOT NULL DEFAULT '{}',
        created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        UNIQUE (collection, id),
        FOREIGN KEY (collection) REFERENCES collections(name)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_documents_created_at ON documents(collection, created_at)",
];
