use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `payload` (always 64 characters).
pub fn hex_sha256(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
