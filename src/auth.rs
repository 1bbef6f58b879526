//! Request signing for the Passgate API.
//!
//! Every API call is authenticated by a deterministic payload signature:
//!
//! 1. The signing payload (request body for writes, filter mapping for reads)
//!    is serialized to JSON and base64-encoded.
//! 2. A SHA-256 digest is computed over the shared secret concatenated with
//!    the encoded payload, rendered as lowercase hex.
//! 3. The digest travels in the `X-PAYLOAD-SIG` header alongside the account
//!    identifier in `X-ACCT-ID`.
//!
//! Requests without a payload (and requests whose payload is an empty object)
//! sign the canonical marker `{"id": "0"}` instead, so the digest is never
//! computed over an empty string and unparameterized calls stay reproducible.
//!
//! GET requests have no body to sign against, so the encoded payload is
//! additionally carried out-of-band as the `sig_payload` query parameter;
//! [`create_get_auth_headers`] returns it for the transport to embed.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::core::{PassgateError, Result};

/// Header carrying the account identifier.
pub const ACCOUNT_ID_HEADER: &str = "X-ACCT-ID";

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "X-PAYLOAD-SIG";

/// Content type header, always `application/json`.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Authentication headers attached to every outgoing request.
pub type AuthHeaders = HashMap<&'static str, String>;

/// Marker payload signed when a request carries no payload of its own.
fn default_sig_payload() -> Value {
    json!({ "id": "0" })
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Encode a signing payload as base64 over its UTF-8 JSON serialization.
///
/// # Errors
///
/// Returns an encoding error if the payload cannot be represented as JSON
/// (for example, a map with non-string keys).
pub fn encode_payload<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    let json = serde_json::to_string(payload).map_err(|e| {
        PassgateError::encoding_with_source("Payload is not JSON-representable", e)
    })?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Compute the request signature for an encoded payload.
///
/// The digest is SHA-256 over `shared_secret || encoded_payload` (UTF-8
/// bytes, no delimiter), rendered as 64 lowercase hex characters.
#[must_use]
pub fn create_signature(shared_secret: &str, encoded_payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(shared_secret.as_bytes());
    hasher.update(encoded_payload.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a signature against an encoded payload.
///
/// Recomputes the digest and compares for exact equality. The comparison is
/// a plain string equality and is not timing-safe.
#[must_use]
pub fn verify_signature(shared_secret: &str, encoded_payload: &str, signature: &str) -> bool {
    create_signature(shared_secret, encoded_payload) == signature
}

fn headers_for(account_id: &str, signature: String) -> AuthHeaders {
    HashMap::from([
        (ACCOUNT_ID_HEADER, account_id.to_string()),
        (SIGNATURE_HEADER, signature),
        (CONTENT_TYPE_HEADER, "application/json".to_string()),
    ])
}

fn encode_or_default(payload: Option<&Value>) -> Result<String> {
    match payload {
        Some(p) if !is_empty_payload(p) => encode_payload(p),
        _ => encode_payload(&default_sig_payload()),
    }
}

/// Create authentication headers for write requests (POST/PATCH/DELETE).
///
/// A missing or empty payload signs the marker payload instead.
///
/// # Errors
///
/// Returns an encoding error if the payload cannot be serialized to JSON.
pub fn create_auth_headers(
    account_id: &str,
    shared_secret: &str,
    payload: Option<&Value>,
) -> Result<AuthHeaders> {
    let encoded = encode_or_default(payload)?;
    let signature = create_signature(shared_secret, &encoded);
    Ok(headers_for(account_id, signature))
}

/// Create authentication headers for GET requests.
///
/// Applies the same empty-payload substitution as [`create_auth_headers`],
/// and additionally returns the encoded payload so the caller can embed it
/// as the `sig_payload` query parameter.
///
/// # Errors
///
/// Returns an encoding error if the payload cannot be serialized to JSON.
pub fn create_get_auth_headers(
    account_id: &str,
    shared_secret: &str,
    sig_payload: Option<&Value>,
) -> Result<(AuthHeaders, String)> {
    let encoded = encode_or_default(sig_payload)?;
    let signature = create_signature(shared_secret, &encoded);
    Ok((headers_for(account_id, signature), encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_payload_is_deterministic() {
        let payload = json!({ "fullName": "John Doe", "email": "john@example.com" });
        let first = encode_payload(&payload).unwrap();
        let second = encode_payload(&payload).unwrap();
        assert_eq!(first, second);

        let decoded = STANDARD.decode(&first).unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert!(text.contains("fullName"));
    }

    #[test]
    fn test_encode_payload_rejects_non_json_representable_input() {
        let payload = std::collections::BTreeMap::from([((1u8, 2u8), "x")]);
        let err = encode_payload(&payload).unwrap_err();
        assert!(matches!(err, PassgateError::Encoding { .. }));
    }

    #[test]
    fn test_signature_is_64_lowercase_hex_chars() {
        let encoded = encode_payload(&json!({ "id": "test" })).unwrap();
        let signature = create_signature("test-secret", &encoded);

        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(signature, create_signature("test-secret", &encoded));
    }

    #[test]
    fn test_signature_matches_reference_vector() {
        // SHA256("test-secret" + base64("{\"id\":\"test\"}"))
        let encoded = encode_payload(&json!({ "id": "test" })).unwrap();
        assert_eq!(encoded, "eyJpZCI6InRlc3QifQ==");
        assert_eq!(
            create_signature("test-secret", &encoded),
            "ac5af7ff986c1f1fa24b117181fde0889d5c90d31a13744c0e6caed2b3cbe32d"
        );
    }

    #[test]
    fn test_verify_signature_round_trip() {
        let encoded = encode_payload(&json!({ "key": "value" })).unwrap();
        let signature = create_signature("secret", &encoded);

        assert!(verify_signature("secret", &encoded, &signature));
        assert!(!verify_signature("other-secret", &encoded, &signature));
        assert!(!verify_signature("secret", "different-payload", &signature));
    }

    #[test]
    fn test_verify_rejects_single_character_mutation() {
        let encoded = encode_payload(&json!({ "id": "test" })).unwrap();
        let signature = create_signature("secret", &encoded);

        for position in 0..signature.len() {
            let mut mutated: Vec<u8> = signature.bytes().collect();
            mutated[position] = if mutated[position] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(mutated).unwrap();
            assert!(!verify_signature("secret", &encoded, &mutated));
        }
    }

    #[test]
    fn test_auth_headers_contain_exactly_three_keys() {
        let headers =
            create_auth_headers("acct_123", "secret", Some(&json!({ "key": "value" }))).unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers[ACCOUNT_ID_HEADER], "acct_123");
        assert_eq!(headers[SIGNATURE_HEADER].len(), 64);
        assert_eq!(headers[CONTENT_TYPE_HEADER], "application/json");
    }

    #[test]
    fn test_missing_and_empty_payloads_sign_identically() {
        let none = create_auth_headers("acct", "secret", None).unwrap();
        let empty = create_auth_headers("acct", "secret", Some(&json!({}))).unwrap();
        let null = create_auth_headers("acct", "secret", Some(&Value::Null)).unwrap();

        assert_eq!(none[SIGNATURE_HEADER], empty[SIGNATURE_HEADER]);
        assert_eq!(none[SIGNATURE_HEADER], null[SIGNATURE_HEADER]);

        // Both resolve to signing the marker payload.
        let marker = encode_payload(&json!({ "id": "0" })).unwrap();
        assert_eq!(none[SIGNATURE_HEADER], create_signature("secret", &marker));
    }

    #[test]
    fn test_get_auth_headers_return_encoded_payload() {
        let (headers, encoded) =
            create_get_auth_headers("acct", "secret", Some(&json!({ "state": "active" })))
                .unwrap();

        assert_eq!(
            encoded,
            encode_payload(&json!({ "state": "active" })).unwrap()
        );
        assert_eq!(
            headers[SIGNATURE_HEADER],
            create_signature("secret", &encoded)
        );
    }

    #[test]
    fn test_get_auth_headers_default_to_marker_payload() {
        let (_, encoded) = create_get_auth_headers("acct", "secret", None).unwrap();
        assert_eq!(encoded, "eyJpZCI6IjAifQ==");
    }
}
