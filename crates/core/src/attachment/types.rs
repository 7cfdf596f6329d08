//! Record capability traits and the client-facing view representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Capability set required of an attachment record.
///
/// Concrete record types are whatever a deployment persists; the transformer
/// only touches the getters and setters listed here. The `Default` bound is
/// the factory for the configured record type: a fresh record starts with no
/// id and no metadata.
pub trait AttachmentRecord: Default + Send {
    /// Persisted identifier; `None` until the record is saved.
    fn id(&self) -> Option<Uuid>;

    /// Original filename as uploaded.
    fn filename(&self) -> Option<&str>;
    /// Sets the original filename.
    fn set_filename(&mut self, filename: Option<String>);

    /// Content hash of the stored file.
    fn file_hash(&self) -> Option<&str>;
    /// Sets the content hash.
    fn set_file_hash(&mut self, file_hash: Option<String>);

    /// File size in bytes.
    fn file_size(&self) -> Option<i64>;
    /// Sets the file size.
    fn set_file_size(&mut self, file_size: Option<i64>);

    /// MIME type of the file.
    fn mime_type(&self) -> Option<&str>;
    /// Sets the MIME type.
    fn set_mime_type(&mut self, mime_type: Option<String>);

    /// Name of the file at its storage location.
    fn physical_name(&self) -> Option<&str>;
    /// Sets the storage-location name.
    fn set_physical_name(&mut self, physical_name: Option<String>);

    /// Caller-defined extra form fields, opaque to the transformer.
    fn additional_form_data(&self) -> &Map<String, Value>;
    /// Replaces the extra form fields.
    fn set_additional_form_data(&mut self, fields: Map<String, Value>);
}

/// Client-facing view of an attachment field.
///
/// `fields` is the flat map transmitted through the form layer: the reserved
/// keys `file` (placeholder), `removed`, and `meta`, merged with the record's
/// additional form data. The raw upload handle cannot travel as JSON and is
/// carried out-of-band in `file`.
#[derive(Debug, Clone)]
pub struct AttachmentView<F> {
    /// Raw upload handle posted with the form, if any.
    pub file: Option<F>,
    /// Flat field map; a JSON object on the happy path.
    pub fields: Value,
}

impl<F> AttachmentView<F> {
    /// Builds a submitted view from an optional upload and the posted fields.
    #[must_use]
    pub fn submission(file: Option<F>, fields: Value) -> Self {
        Self { file, fields }
    }
}

/// Plain attachment record for deployments without a bespoke entity type.
///
/// `uploaded_by` is deliberately outside the token snapshot: it belongs to
/// the canonical persisted record and must survive a token round trip
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicAttachment {
    /// Persisted identifier.
    pub id: Option<Uuid>,
    /// Original filename.
    pub filename: Option<String>,
    /// Content hash.
    pub file_hash: Option<String>,
    /// File size in bytes.
    pub file_size: Option<i64>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Storage-location name.
    pub physical_name: Option<String>,
    /// User who uploaded the file; not part of the token snapshot.
    pub uploaded_by: Option<Uuid>,
    /// Caller-defined extra form fields.
    pub additional_form_data: Map<String, Value>,
}

impl AttachmentRecord for BasicAttachment {
    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    fn set_filename(&mut self, filename: Option<String>) {
        self.filename = filename;
    }

    fn file_hash(&self) -> Option<&str> {
        self.file_hash.as_deref()
    }

    fn set_file_hash(&mut self, file_hash: Option<String>) {
        self.file_hash = file_hash;
    }

    fn file_size(&self) -> Option<i64> {
        self.file_size
    }

    fn set_file_size(&mut self, file_size: Option<i64>) {
        self.file_size = file_size;
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    fn set_mime_type(&mut self, mime_type: Option<String>) {
        self.mime_type = mime_type;
    }

    fn physical_name(&self) -> Option<&str> {
        self.physical_name.as_deref()
    }

    fn set_physical_name(&mut self, physical_name: Option<String>) {
        self.physical_name = physical_name;
    }

    fn additional_form_data(&self) -> &Map<String, Value> {
        &self.additional_form_data
    }

    fn set_additional_form_data(&mut self, fields: Map<String, Value>) {
        self.additional_form_data = fields;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_is_unsaved_and_empty() {
        let record = BasicAttachment::default();
        assert!(record.id().is_none());
        assert!(record.filename().is_none());
        assert!(record.additional_form_data().is_empty());
    }

    #[test]
    fn test_setters_roundtrip_through_the_trait() {
        let mut record = BasicAttachment::default();
        record.set_filename(Some("notes.txt".to_string()));
        record.set_file_hash(Some("cafe".to_string()));
        record.set_file_size(Some(12));
        record.set_mime_type(Some("text/plain".to_string()));
        record.set_physical_name(Some("x/y.txt".to_string()));

        assert_eq!(record.filename(), Some("notes.txt"));
        assert_eq!(record.file_hash(), Some("cafe"));
        assert_eq!(record.file_size(), Some(12));
        assert_eq!(record.mime_type(), Some("text/plain"));
        assert_eq!(record.physical_name(), Some("x/y.txt"));
    }

    #[test]
    fn test_additional_form_data_replacement() {
        let mut record = BasicAttachment::default();
        let mut fields = Map::new();
        fields.insert("caption".to_string(), json!("hi"));
        record.set_additional_form_data(fields);

        assert_eq!(record.additional_form_data().get("caption"), Some(&json!("hi")));
    }
}
