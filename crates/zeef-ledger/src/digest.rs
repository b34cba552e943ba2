//! Content digests
//!
//! The ledger never stores command output, file content, or model text
//! verbatim. It stores a SHA-256 fingerprint instead, which is enough to
//! prove equality against an externally retained copy after the fact.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of raw bytes.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
