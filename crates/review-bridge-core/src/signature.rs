//! Keyed-digest verification of webhook request bodies.
//!
//! The forge signs every delivery with `HMAC-SHA1(secret, raw_body)` and
//! sends the result as `sha1=<lowercase-hex>` in the `X-Hub-Signature`
//! header. Verification must run over the raw, unparsed body bytes — a
//! re-serialized JSON document would not reproduce the original byte stream.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::Zeroizing;

type HmacSha1 = Hmac<Sha1>;

/// Algorithm prefix the signature header must carry.
const SIGNATURE_PREFIX: &str = "sha1=";

/// Verifies webhook signatures against a shared secret.
///
/// When no secret is configured the verifier runs in **permissive mode**:
/// every request passes, which disables authentication entirely. That mode
/// exists for local development; construction logs a `WARN` so operators
/// notice before it reaches production.
///
/// Verification never returns an error. A missing header, an unsupported
/// algorithm prefix, a hex digest that fails to decode, and a digest
/// mismatch are all reported uniformly as `false` so that a caller cannot
/// be tricked into leaking which sub-check failed.
pub struct SignatureVerifier {
    secret: Option<Zeroizing<String>>,
}

impl SignatureVerifier {
    /// Construct a verifier for the given secret.
    ///
    /// `None` or an empty string means no secret is configured and every
    /// request will be accepted unverified.
    pub fn new(secret: Option<String>) -> Self {
        match secret {
            Some(value) if !value.is_empty() => Self {
                secret: Some(Zeroizing::new(value)),
            },
            _ => Self::permissive(),
        }
    }

    /// Construct a verifier that accepts every request.
    ///
    /// Emits a `WARN` because unauthenticated webhook intake is only
    /// acceptable for local development.
    pub fn permissive() -> Self {
        warn!(
            "no webhook secret configured — signature verification is disabled \
             and every delivery will be accepted"
        );
        Self { secret: None }
    }

    /// Whether a secret is configured.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Verify `signature_header` against the raw request `body`.
    ///
    /// Returns `true` when no secret is configured, or when the header is a
    /// well-formed `sha1=<hex>` token whose digest equals
    /// `HMAC-SHA1(secret, body)`. The digest comparison is constant-time.
    pub fn verify(&self, signature_header: Option<&str>, body: &[u8]) -> bool {
        let secret = match &self.secret {
            Some(secret) => secret,
            None => {
                debug!("webhook secret not configured, skipping signature verification");
                return true;
            }
        };

        let header = match signature_header {
            Some(header) => header,
            None => return false,
        };

        let hex_digest = match header.strip_prefix(SIGNATURE_PREFIX) {
            Some(hex_digest) => hex_digest,
            None => {
                debug!("unsupported webhook signature algorithm prefix");
                return false;
            }
        };

        let provided = match hex::decode(hex_digest) {
            Ok(bytes) => bytes,
            Err(_) => {
                debug!("webhook signature is not valid hex");
                return false;
            }
        };

        let expected = Self::expected_digest(secret.as_bytes(), body);
        expected.ct_eq(provided.as_slice()).into()
    }

    /// Compute `HMAC-SHA1(secret, body)`.
    fn expected_digest(secret: &[u8], body: &[u8]) -> Vec<u8> {
        // HMAC accepts keys of any length, so new_from_slice cannot fail.
        let mut mac = HmacSha1::new_from_slice(secret)
            .unwrap_or_else(|_| unreachable!("HMAC-SHA1 accepts keys of any length"));
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field(
                "secret",
                if self.secret.is_some() {
                    &"<REDACTED>"
                } else {
                    &"<NONE>"
                },
            )
            .finish()
    }
}

/// Compute the `sha1=<hex>` signature token for `body` keyed by `secret`.
///
/// This is the sender side of the contract; the service itself only ever
/// verifies, but tests and local tooling need to produce valid tokens.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let digest = SignatureVerifier::expected_digest(secret.as_bytes(), body);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest))
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
