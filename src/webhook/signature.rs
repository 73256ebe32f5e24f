//! HMAC-SHA256 signatures on inbound webhook bodies.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature on webhook deliveries.
pub const SIGNATURE_HEADER: &str = "X-CCAI-Signature";

/// Checks `signature` against the HMAC-SHA256 of `body` keyed with `secret`.
///
/// The expected signature is lowercase hex; uppercase input never matches.
/// Comparison runs in constant time. Returns false if any argument is empty.
///
/// # Example
///
/// ```
/// use ccai::webhook::{sign_payload, verify_signature};
///
/// let body = r#"{"type":"message.sent"}"#;
/// let signature = sign_payload(body, "whsec").unwrap();
///
/// assert!(verify_signature(&signature, body, "whsec"));
/// assert!(!verify_signature(&signature, body, "other"));
/// ```
#[must_use]
pub fn verify_signature(signature: &str, body: &str, secret: &str) -> bool {
    if signature.is_empty() || body.is_empty() {
        return false;
    }
    let Some(expected) = sign_payload(body, secret) else {
        return false;
    };
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// Computes the lowercase hex signature of `body`.
///
/// Returns `None` for an empty secret.
#[must_use]
pub fn sign_payload(body: &str, secret: &str) -> Option<String> {
    if secret.is_empty() {
        return None;
    }
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}
