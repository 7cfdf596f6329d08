//! Unit tests for the attachment token codec.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use crate::token::{TokenCodec, TokenError};
    use crate::types::AttachmentSnapshot;

    fn create_test_codec() -> TokenCodec {
        TokenCodec::new("test-secret-key-for-testing".as_bytes().to_vec())
    }

    fn sample_snapshot() -> AttachmentSnapshot {
        let mut snapshot = AttachmentSnapshot::new(Some(Uuid::new_v4()));
        snapshot.filename = Some("report.pdf".to_string());
        snapshot.file_hash = Some("deadbeef".to_string());
        snapshot.file_size = Some(4096);
        snapshot.mime_type = Some("application/pdf".to_string());
        snapshot.physical_name = Some("ab/cdef01.pdf".to_string());
        snapshot
    }

    #[test]
    fn test_encode_produces_mac_and_payload() {
        let codec = create_test_codec();
        let token = codec.encode(&sample_snapshot()).unwrap();

        let (mac, payload) = token.split_once('|').unwrap();
        // HMAC-SHA256 is 32 bytes, 64 hex chars.
        assert_eq!(mac.len(), 64);
        assert!(mac.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_decode_roundtrip() {
        let codec = create_test_codec();
        let snapshot = sample_snapshot();

        let token = codec.encode(&snapshot).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let codec = create_test_codec();
        let other = TokenCodec::new("a-different-secret".as_bytes().to_vec());

        let token = codec.encode(&sample_snapshot()).unwrap();
        let result = other.decode(&token);

        assert!(matches!(result, Err(TokenError::MacMismatch)));
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let codec = create_test_codec();
        let token = codec.encode(&sample_snapshot()).unwrap();

        let (mac, payload) = token.split_once('|').unwrap();
        // Swap the first payload character for a different base64 character.
        let mut chars: Vec<char> = payload.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        let result = codec.decode(&format!("{mac}|{tampered}"));
        assert!(matches!(
            result,
            Err(TokenError::MacMismatch | TokenError::Malformed)
        ));
    }

    #[rstest]
    #[case("")]
    #[case("no-delimiter-at-all")]
    #[case("not-hex|aGVsbG8=")]
    #[case("abcd|???not-base64???")]
    fn test_decode_rejects_malformed_input(#[case] token: &str) {
        let codec = create_test_codec();
        assert!(matches!(codec.decode(token), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_decode_rejects_authenticated_non_snapshot_payload() {
        // A correctly MACed payload that does not deserialize as a snapshot
        // is still malformed.
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD;
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        let secret = b"test-secret-key-for-testing";
        let codec = TokenCodec::new(secret.to_vec());

        let payload = br#"{"not":"a snapshot"}"#;
        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(payload);
        let tag = hex::encode(mac.finalize().into_bytes());

        let token = format!("{tag}|{}", STANDARD.encode(payload));
        assert!(matches!(codec.decode(&token), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let codec = create_test_codec();
        let mut snapshot = sample_snapshot();
        snapshot.version = 9;

        let token = codec.encode(&snapshot).unwrap();
        let result = codec.decode(&token);

        assert!(matches!(result, Err(TokenError::UnsupportedVersion(9))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let codec = create_test_codec();
        let debug = format!("{codec:?}");
        assert!(!debug.contains("test-secret"));
        assert!(debug.contains("[hidden]"));
    }
}
