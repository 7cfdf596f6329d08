//! Core attachment round-trip logic for Attache.
//!
//! This crate contains the forward/reverse transformation protocol that lets
//! a web form carry a file-attachment field across a stateless round trip.
//! Persistence and upload normalization are external collaborators supplied
//! through traits; this crate has ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `attachment` - Record capability traits, view representation, and the
//!   transformer itself

pub mod attachment;
