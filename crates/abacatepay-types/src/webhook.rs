//! Webhook signature verification.
//!
//! AbacatePay signs every webhook delivery with HMAC-SHA256 over the raw
//! request body, keyed with a public key published in its documentation, and
//! sends the base64 digest in the `X-Webhook-Signature` header. Handlers must
//! verify the signature against the exact bytes received, before parsing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature on webhook deliveries.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Key AbacatePay uses to sign webhook deliveries.
pub const ABACATEPAY_PUBLIC_KEY: &str = "t9dXRhHHo3yDEj5pVDYz0frf7q6bMKyMRmxxCPIPp3RCplBfXRxqlC6ZpiWmOqj4L63qEaeUOtrCI8P0VMUgo6iIga2ri9ogaHFs0WIIywSMg0q7RmBfybe1E5XJcfC4IW3alNqym0tXoAKkzvfEjZxV6bE0oG2zJrNNYmUCKZyV0KZ3JS8Votf9EAWWYdiDkMkpbMdPggfh1EqHlVkMiTady6jOR3hyzGEHrIz2Ret0xHKMbiqkr9HS1JhNHDX9";

/// Verifies webhook signatures with a fixed HMAC key.
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: HmacSha256,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// Verifier keyed with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLength`] if the key is rejected by the HMAC
    /// implementation.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, InvalidLength> {
        let mac = HmacSha256::new_from_slice(key.as_ref())?;
        Ok(Self { mac })
    }

    /// Verifier keyed with [`ABACATEPAY_PUBLIC_KEY`].
    pub fn abacatepay() -> Result<Self, InvalidLength> {
        Self::new(ABACATEPAY_PUBLIC_KEY)
    }

    /// Base64 HMAC-SHA256 digest of `payload`.
    pub fn sign(&self, payload: impl AsRef<[u8]>) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_ref());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Checks `signature` (base64) against the digest of `payload`.
    ///
    /// The comparison runs in constant time over the digest and is exact:
    /// surrounding whitespace in `signature` is not stripped. No size limit is
    /// applied to the payload.
    pub fn verify(&self, payload: impl AsRef<[u8]>, signature: &str) -> bool {
        let expected = self.sign(payload);
        let expected = expected.as_bytes();
        let provided = signature.as_bytes();

        // The digest length is public, only the content needs a constant-time compare.
        if expected.len() != provided.len() {
            #[cfg(feature = "telemetry")]
            tracing::debug!("webhook signature rejected: length mismatch");
            return false;
        }
        let valid: bool = expected.ct_eq(provided).into();
        if !valid {
            #[cfg(feature = "telemetry")]
            tracing::debug!("webhook signature rejected: digest mismatch");
        }
        valid
    }
}

/// Verifies a webhook delivery against the AbacatePay public key.
///
/// `payload` must be the raw request body and `signature` the value of the
/// [`SIGNATURE_HEADER`] header.
pub fn verify_signature(payload: impl AsRef<[u8]>, signature: &str) -> bool {
    SignatureVerifier::abacatepay().is_ok_and(|verifier| verifier.verify(payload, signature))
}
