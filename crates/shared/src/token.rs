//! Authenticated attachment token encoding and verification.
//!
//! A token is `hex(mac) + "|" + base64(payload)` where `payload` is the JSON
//! encoding of an [`AttachmentSnapshot`] and `mac` is HMAC-SHA256 over the
//! payload bytes under a server-held secret. The MAC is the only mechanism
//! bridging the render and submit halves of a stateless form round trip.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::types::{AttachmentSnapshot, SNAPSHOT_VERSION};

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Payload serialization failed.
    #[error("failed to encode token payload: {0}")]
    Encoding(String),

    /// Token structure is not `mac|payload` with valid hex/base64/JSON parts.
    #[error("malformed token")]
    Malformed,

    /// Recomputed MAC does not match the embedded MAC.
    #[error("token MAC mismatch")]
    MacMismatch,

    /// Payload carries a snapshot version this codec does not understand.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u8),
}

/// What `reverse_transform` does with a token that fails verification.
///
/// The original protocol silently treats an unverifiable token as absent, so
/// a stale or tampered form degrades to "no prior attachment" instead of
/// failing the whole submission. That remains the default; deployments that
/// would rather see tampering surface as an error can opt into `Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityPolicy {
    /// Treat an unverifiable token as if no token was submitted.
    #[default]
    Ignore,
    /// Surface the token error to the caller.
    Fail,
}

/// Codec for authenticated attachment tokens.
///
/// The secret is fixed at construction; the codec holds no other state and is
/// safe for concurrent reuse.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec keyed with the given secret.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Encodes a snapshot into an authenticated token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if the payload cannot be serialized.
    pub fn encode(&self, snapshot: &AttachmentSnapshot) -> Result<String, TokenError> {
        let payload =
            serde_json::to_vec(snapshot).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let mac = self.compute_mac(&payload)?;
        Ok(format!("{}|{}", hex::encode(mac), BASE64.encode(&payload)))
    }

    /// Verifies and decodes a token back into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` on structural problems,
    /// `TokenError::MacMismatch` when the MAC does not verify, and
    /// `TokenError::UnsupportedVersion` for unknown payload versions. Never
    /// panics on hostile input.
    pub fn decode(&self, token: &str) -> Result<AttachmentSnapshot, TokenError> {
        let (mac_hex, payload_b64) = token.split_once('|').ok_or(TokenError::Malformed)?;
        let mac = hex::decode(mac_hex).map_err(|_| TokenError::Malformed)?;
        let payload = BASE64
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;

        // Constant-time comparison via the Mac trait.
        let mut hmac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        hmac.update(&payload);
        hmac.verify_slice(&mac).map_err(|_| TokenError::MacMismatch)?;

        let snapshot: AttachmentSnapshot =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(TokenError::UnsupportedVersion(snapshot.version));
        }

        Ok(snapshot)
    }

    fn compute_mac(&self, payload: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut hmac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        hmac.update(payload);
        Ok(hmac.finalize().into_bytes().to_vec())
    }
}
