//! Document identifier generation.
//!
//! Identifiers are 24 lowercase hex characters: a 4-byte big-endian
//! seconds timestamp followed by 8 bytes of a SHA256 over the collection,
//! the nanosecond timestamp, the process id and a process-wide counter.
//! They sort roughly by creation time but callers must treat them as opaque.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Length of a generated identifier.
pub const ID_LENGTH: usize = 24;

/// Encodes bytes as lowercase hex.
pub fn encode_hex(data: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(data.len() * 2);
    for b in data {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

/// Creates a new identifier for a document in `collection`.
pub fn generate_id(collection: &str, timestamp: DateTime<Utc>) -> String {
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    generate_id_with_nonce(collection, timestamp, count)
}

/// Deterministic variant of [`generate_id`] with an explicit nonce.
pub fn generate_id_with_nonce(collection: &str, timestamp: DateTime<Utc>, nonce: u64) -> String {
    let content = format!(
        "{}|{}|{}|{}",
        collection,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        std::process::id(),
        nonce
    );
    let hash = Sha256::digest(content.as_bytes());

    let secs = u32::try_from(timestamp.timestamp().max(0)).unwrap_or(u32::MAX);
    let mut bytes = Vec::with_capacity(12);
    bytes.extend_from_slice(&secs.to_be_bytes());
    bytes.extend_from_slice(&hash[..8]);
    encode_hex(&bytes)
}

/// Returns `true` if `id` has the shape of a generated identifier.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
