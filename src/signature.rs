//! HMAC-SHA256 signing and verification for webhook payloads.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Signs and verifies request bodies with HMAC-SHA256.
///
/// The key schedule is derived once at construction and cloned per call,
/// so repeated operations never re-derive the key. Signatures are
/// formatted as `sha256=<lowercase hex digest>`.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Creates a signer for the given shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        Self { mac }
    }

    /// Computes the signature of a payload.
    #[must_use]
    pub fn sign(&self, data: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(data);
        let digest = hex::encode(mac.finalize().into_bytes());
        format!("{SIGNATURE_PREFIX}{digest}")
    }

    /// Checks a signature against a payload.
    ///
    /// The `sha256=` prefix is optional. Malformed hex, a length mismatch,
    /// and a digest mismatch all return `false`; this never panics or
    /// errors.
    #[must_use]
    pub fn verify(&self, signature: &str, data: &[u8]) -> bool {
        let hex_digest = signature
            .strip_prefix(SIGNATURE_PREFIX)
            .unwrap_or(signature);
        let Ok(claimed) = hex::decode(hex_digest) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(data);
        // verify_slice compares in constant time.
        mac.verify_slice(&claimed).is_ok()
    }
}

// Never expose key material through Debug.
impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}
