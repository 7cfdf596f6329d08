//! Versioned snapshot payload embedded in attachment tokens.
//!
//! The snapshot is an explicit field list rather than a serialized object
//! graph, so the token wire format stays decodable across independent
//! implementations. Field order is fixed by declaration order, which makes
//! the JSON encoding deterministic.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current snapshot format version. `TokenCodec::decode` rejects any other.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Snapshot of an attachment record's metadata at the moment a form was
/// rendered.
///
/// All metadata fields are optional: a freshly created record that has never
/// seen an upload carries none of them. `id` is present only when the record
/// was persisted at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSnapshot {
    /// Snapshot format version.
    pub version: u8,
    /// Persisted record identifier, if any.
    pub id: Option<Uuid>,
    /// Original filename as uploaded.
    pub filename: Option<String>,
    /// Content hash of the stored file.
    pub file_hash: Option<String>,
    /// File size in bytes.
    pub file_size: Option<i64>,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// Name of the file at its storage location.
    pub physical_name: Option<String>,
}

impl AttachmentSnapshot {
    /// Creates an empty snapshot at the current format version.
    #[must_use]
    pub fn new(id: Option<Uuid>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id,
            filename: None,
            file_hash: None,
            file_size: None,
            mime_type: None,
            physical_name: None,
        }
    }
}
