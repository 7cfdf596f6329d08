//! Forward and reverse attachment transformation.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use attache_shared::config::TokenConfig;
use attache_shared::token::{IntegrityPolicy, TokenCodec};
use attache_shared::types::AttachmentSnapshot;

use super::error::TransformError;
use super::types::{AttachmentRecord, AttachmentView};

/// Resolver from a record id to the canonical persisted record.
///
/// This trait is implemented by the persistence layer. A lookup miss is the
/// store's fault to report; the transformer adds no recovery around it.
pub trait ObjectStore<R>: Send + Sync {
    /// Find the canonical record for a persisted id.
    fn find(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<R, TransformError>> + Send;
}

/// Normalizer turning a raw uploaded file into record metadata.
///
/// Implementations may perform I/O (moving the file into storage, hashing it)
/// and mutate the record's metadata fields in place.
pub trait UploadAcceptor<R>: Send + Sync {
    /// Raw upload handle type produced by the form layer.
    type Upload: Send + Sync;

    /// Accept an upload, populating the record's metadata fields.
    fn accept_upload(
        &self,
        upload: &Self::Upload,
        record: &mut R,
    ) -> impl std::future::Future<Output = Result<(), TransformError>> + Send;
}

/// Round-trip transformer for attachment form fields.
///
/// Forward: project a record into a view representation embedding an
/// authenticated token. Reverse: reconstruct a record from a submission by
/// merging the token, a fresh upload, and caller-supplied extra fields,
/// trusting only what the server signed.
///
/// Configuration is immutable after construction; the transformer is safe
/// for concurrent reuse across requests as long as its collaborators are.
pub struct AttachmentTransformer<R, S, U>
where
    R: AttachmentRecord,
    S: ObjectStore<R>,
    U: UploadAcceptor<R>,
{
    codec: TokenCodec,
    integrity_policy: IntegrityPolicy,
    store: Arc<S>,
    acceptor: Arc<U>,
    _record: PhantomData<fn() -> R>,
}

impl<R, S, U> AttachmentTransformer<R, S, U>
where
    R: AttachmentRecord,
    S: ObjectStore<R>,
    U: UploadAcceptor<R>,
{
    /// Create a new transformer from token configuration and collaborators.
    #[must_use]
    pub fn new(config: TokenConfig, store: Arc<S>, acceptor: Arc<U>) -> Self {
        Self {
            codec: TokenCodec::new(config.secret),
            integrity_policy: config.integrity_policy,
            store,
            acceptor,
            _record: PhantomData,
        }
    }

    /// Projects a record into the client-facing view representation.
    ///
    /// The token snapshots the record's *current* state, not any previously
    /// issued token, so concurrent external modifications to the entity are
    /// reflected. Pure projection; no side effects.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::Token` if the snapshot cannot be encoded.
    pub fn transform(&self, value: Option<&R>) -> Result<AttachmentView<U::Upload>, TransformError> {
        let meta = match value {
            None => Value::Null,
            Some(record) => Value::String(self.codec.encode(&snapshot_of(record))?),
        };

        let mut fields = Map::new();
        fields.insert("file".to_string(), Value::Null);
        fields.insert("removed".to_string(), Value::Bool(false));
        fields.insert("meta".to_string(), meta);

        // Reserved keys win on collision with additional-field names.
        if let Some(record) = value {
            for (key, val) in record.additional_form_data() {
                fields.entry(key.clone()).or_insert_with(|| val.clone());
            }
        }

        Ok(AttachmentView {
            file: None,
            fields: Value::Object(fields),
        })
    }

    /// Reconstructs a record from a submitted view representation.
    ///
    /// Returns `Ok(None)` when the submission carries no attachment: either
    /// removal was requested with no new file, or there was no attachment in
    /// the first place. The caller owns any deletion side effect.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::MalformedSubmission` if the submitted fields
    /// are not a map or lack the `meta` key entirely. Collaborator failures
    /// and, under `IntegrityPolicy::Fail`, token failures are propagated.
    pub async fn reverse_transform(
        &self,
        view: AttachmentView<U::Upload>,
    ) -> Result<Option<R>, TransformError> {
        let AttachmentView { file, fields } = view;
        let Value::Object(fields) = fields else {
            return Err(TransformError::malformed_submission(
                "submitted value is not a field map",
            ));
        };
        if !fields.contains_key("meta") {
            return Err(TransformError::malformed_submission("missing meta field"));
        }

        let meta = match fields.get("meta") {
            Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
            _ => None,
        };
        let removed = fields.get("removed").is_some_and(is_truthy);

        // No new file uploaded, and either removal was requested or there
        // was no attachment in the first place.
        if file.is_none() && (removed || meta.is_none()) {
            return Ok(None);
        }

        let mut record = match meta {
            Some(token) => self.record_from_token(&token).await?,
            None => None,
        };

        // A new file supersedes token metadata on the same record instance.
        if let Some(upload) = &file {
            let mut working = record.take().unwrap_or_default();
            self.acceptor.accept_upload(upload, &mut working).await?;
            record = Some(working);
        }

        // Apply the full submitted field map, reserved keys included,
        // mirroring the flattening done by the forward transform.
        Ok(record.map(|mut working| {
            working.set_additional_form_data(fields);
            working
        }))
    }

    /// Rebuilds the working record from an authenticated token.
    ///
    /// Returns `Ok(None)` when the token fails verification and the policy
    /// is `Ignore`: the submission proceeds as if no token were present.
    async fn record_from_token(&self, token: &str) -> Result<Option<R>, TransformError> {
        let snapshot = match self.codec.decode(token) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                return match self.integrity_policy {
                    IntegrityPolicy::Ignore => {
                        tracing::warn!(error = %err, "ignoring attachment token that failed verification");
                        Ok(None)
                    }
                    IntegrityPolicy::Fail => Err(err.into()),
                };
            }
        };

        let mut record = if let Some(id) = snapshot.id {
            tracing::debug!(%id, "restoring attachment metadata onto canonical record");
            self.store.find(id).await?
        } else {
            R::default()
        };

        // Only the snapshot's metadata fields are applied; any other state
        // the canonical record has accrued since the form was rendered is
        // preserved.
        apply_metadata(&mut record, &snapshot);
        Ok(Some(record))
    }
}

/// Captures a record's metadata fields into a token payload.
fn snapshot_of<R: AttachmentRecord>(record: &R) -> AttachmentSnapshot {
    let mut snapshot = AttachmentSnapshot::new(record.id());
    snapshot.filename = record.filename().map(str::to_string);
    snapshot.file_hash = record.file_hash().map(str::to_string);
    snapshot.file_size = record.file_size();
    snapshot.mime_type = record.mime_type().map(str::to_string);
    snapshot.physical_name = record.physical_name().map(str::to_string);
    snapshot
}

/// Copies the snapshot's metadata fields onto a record, nothing else.
fn apply_metadata<R: AttachmentRecord>(record: &mut R, snapshot: &AttachmentSnapshot) {
    record.set_filename(snapshot.filename.clone());
    record.set_file_hash(snapshot.file_hash.clone());
    record.set_file_size(snapshot.file_size);
    record.set_mime_type(snapshot.mime_type.clone());
    record.set_physical_name(snapshot.physical_name.clone());
}

/// PHP-style truthiness for the submitted `removed` flag.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}
