//! Shared types, token codec, and configuration for Attache.
//!
//! This crate provides the pieces of the attachment round-trip protocol that
//! carry no domain logic:
//! - The versioned snapshot payload embedded in tokens
//! - The authenticated token codec (MAC scheme)
//! - Configuration management

pub mod config;
pub mod token;
pub mod types;

pub use config::{AppConfig, TokenConfig};
pub use token::{IntegrityPolicy, TokenCodec, TokenError};
pub use types::AttachmentSnapshot;

#[cfg(test)]
mod token_tests;
