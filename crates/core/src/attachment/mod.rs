//! Attachment form round-trip transformation.
//!
//! This module provides the core protocol for carrying an attachment field
//! across a render → edit → submit cycle:
//! - Forward projection of a record into a client-facing view with an
//!   authenticated token
//! - Reverse reconstruction merging the token, a fresh upload, and
//!   caller-supplied extra fields

mod error;
mod transformer;
mod types;

pub use error::TransformError;
pub use transformer::{AttachmentTransformer, ObjectStore, UploadAcceptor};
pub use types::{AttachmentRecord, AttachmentView, BasicAttachment};
