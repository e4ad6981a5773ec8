//! Document CRUD operations for [`SqliteStore`].

use chrono::{DateTime, Duration, SubsecRound, Utc};
use crm_core::datetime::{format_datetime, parse_datetime};
use crm_core::fields::{CREATED_AT_KEY, Fields, ID_KEY, UPDATED_AT_KEY, is_managed};
use crm_core::idgen::generate_id;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::sqlite::store::SqliteStore;

/// Current time at the millisecond precision used in storage.
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Picks the next `updatedAt`: now, or 1ms after `previous` if the clock has
/// not moved past it.
pub(crate) fn next_updated_at(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if now <= prev => prev + Duration::milliseconds(1),
        _ => now,
    }
}

/// Builds the stored body: caller fields minus managed keys, plus the
/// store-owned id and timestamps.
fn stamp(mut doc: Fields, id: &str, created_at: &str, updated_at: &str) -> Fields {
    doc.retain(|k, _| !is_managed(k));
    doc.insert(ID_KEY.into(), Value::String(id.to_owned()));
    doc.insert(CREATED_AT_KEY.into(), Value::String(created_at.to_owned()));
    doc.insert(UPDATED_AT_KEY.into(), Value::String(updated_at.to_owned()));
    doc
}

/// Parses a stored row back into a document; the columns are authoritative
/// for the managed keys.
fn scan_document(
    collection: &str,
    id: String,
    body: &str,
    created_at: &str,
    updated_at: &str,
) -> Result<Fields> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(doc)) => Ok(stamp(doc, &id, created_at, updated_at)),
        Ok(other) => Err(StorageError::Corrupt {
            collection: collection.to_owned(),
            id,
            reason: format!("expected object, found {other}"),
        }),
        Err(e) => Err(StorageError::Corrupt {
            collection: collection.to_owned(),
            id,
            reason: e.to_string(),
        }),
    }
}

fn ensure_collection(conn: &Connection, collection: &str) -> Result<()> {
    let known: Option<String> = conn
        .query_row(
            "SELECT name FROM collections WHERE name = ?1",
            params![collection],
            |row| row.get(0),
        )
        .optional()?;
    match known {
        Some(_) => Ok(()),
        None => Err(StorageError::UnknownCollection(collection.to_owned())),
    }
}

// ---------------------------------------------------------------------------
// Connection-level helpers
// ---------------------------------------------------------------------------

pub(crate) fn insert_on_conn(conn: &Connection, collection: &str, doc: Fields) -> Result<Fields> {
    ensure_collection(conn, collection)?;
    let now = now_millis();
    let id = generate_id(collection, now);
    let ts = format_datetime(&now);
    let doc = stamp(doc, &id, &ts, &ts);
    let body = serde_json::to_string(&doc)?;

    conn.execute(
        "INSERT INTO documents (collection, id, body, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![collection, id, body, ts, ts],
    )?;
    debug!(collection, id, "inserted document");
    Ok(doc)
}

pub(crate) fn get_on_conn(conn: &Connection, collection: &str, id: &str) -> Result<Fields> {
    ensure_collection(conn, collection)?;
    let (body, created_at, updated_at): (String, String, String) = conn
        .query_row(
            "SELECT body, created_at, updated_at FROM documents
             WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found(collection, id),
            other => StorageError::Query(other),
        })?;
    scan_document(collection, id.to_owned(), &body, &created_at, &updated_at)
}

pub(crate) fn list_on_conn(conn: &Connection, collection: &str) -> Result<Vec<Fields>> {
    ensure_collection(conn, collection)?;
    let mut stmt = conn.prepare(
        "SELECT id, body, created_at, updated_at FROM documents
         WHERE collection = ?1
         ORDER BY created_at DESC, seq DESC",
    )?;
    let rows = stmt.query_map(params![collection], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut docs = Vec::new();
    for row in rows {
        let (id, body, created_at, updated_at) = row?;
        docs.push(scan_document(collection, id, &body, &created_at, &updated_at)?);
    }
    Ok(docs)
}

pub(crate) fn replace_on_conn(
    conn: &Connection,
    collection: &str,
    id: &str,
    doc: Fields,
) -> Result<Fields> {
    ensure_collection(conn, collection)?;
    let (created_at, previous): (String, String) = conn
        .query_row(
            "SELECT created_at, updated_at FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found(collection, id),
            other => StorageError::Query(other),
        })?;

    let updated = next_updated_at(parse_datetime(&previous), now_millis());
    let updated_at = format_datetime(&updated);
    let doc = stamp(doc, id, &created_at, &updated_at);
    let body = serde_json::to_string(&doc)?;

    let affected = conn.execute(
        "UPDATE documents SET body = ?1, updated_at = ?2 WHERE collection = ?3 AND id = ?4",
        params![body, updated_at, collection, id],
    )?;
    if affected == 0 {
        return Err(StorageError::not_found(collection, id));
    }
    debug!(collection, id, "replaced document");
    Ok(doc)
}

pub(crate) fn delete_on_conn(conn: &Connection, collection: &str, id: &str) -> Result<()> {
    ensure_collection(conn, collection)?;
    let affected = conn.execute(
        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
        params![collection, id],
    )?;
    if affected == 0 {
        return Err(StorageError::not_found(collection, id));
    }
    debug!(collection, id, "deleted document");
    Ok(())
}

// ---------------------------------------------------------------------------
// SqliteStore methods
// ---------------------------------------------------------------------------

impl SqliteStore {
    pub fn insert_impl(&self, collection: &str, doc: Fields) -> Result<Fields> {
        let conn = self.lock_conn()?;
        insert_on_conn(&conn, collection, doc)
    }

    pub fn get_impl(&self, collection: &str, id: &str) -> Result<Fields> {
        let conn = self.lock_conn()?;
        get_on_conn(&conn, collection, id)
    }

    pub fn list_impl(&self, collection: &str) -> Result<Vec<Fields>> {
        let conn = self.lock_conn()?;
        list_on_conn(&conn, collection)
    }

    pub fn replace_impl(&self, collection: &str, id: &str, doc: Fields) -> Result<Fields> {
        let conn = self.lock_conn()?;
        replace_on_conn(&conn, collection, id, doc)
    }

    pub fn delete_impl(&self, collection: &str, id: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        delete_on_conn(&conn, collection, id)
    }
}
