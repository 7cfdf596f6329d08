//! Common types used across the attachment protocol.

pub mod snapshot;

pub use snapshot::{AttachmentSnapshot, SNAPSHOT_VERSION};
