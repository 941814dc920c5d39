//! String-to-sign construction.
//!
//! ```text
//! Transactions RSA-SHA256   METHOD:URL:bodyDigest:TIMESTAMP
//! Transactions HMAC-SHA512  METHOD:URL:ACCESS_TOKEN:bodyDigest:TIMESTAMP
//! Token RSA-SHA256          CLIENT_ID|TIMESTAMP
//! ```
//!
//! `bodyDigest` is `Lowercase(HexEncode(SHA-256(minify(body))))` and is empty
//! when there is no body. Field order and delimiters are part of the
//! signature contract with the receiving party.

mod body;
pub mod json;

pub use body::{RequestBody, body_digest};

pub const TRANSACTION_DELIMITER: &str = ":";
pub const TOKEN_DELIMITER: &str = "|";

pub fn transactions_rsa_string_to_sign(
    method: &str,
    url: &str,
    body_digest: &str,
    timestamp: &str,
) -> String {
    // The digest is already lowercase hex; lowercasing again keeps parity
    // with receivers that rely on it.
    let body_digest = body_digest.to_lowercase();
    [method, url, body_digest.as_str(), timestamp].join(TRANSACTION_DELIMITER)
}

pub fn transactions_hmac_string_to_sign(
    method: &str,
    url: &str,
    access_token: &str,
    body_digest: &str,
    timestamp: &str,
) -> String {
    let body_digest = body_digest.to_lowercase();
    [method, url, access_token, body_digest.as_str(), timestamp].join(TRANSACTION_DELIMITER)
}

pub fn token_string_to_sign(client_id: &str, timestamp: &str) -> String {
    [client_id, timestamp].join(TOKEN_DELIMITER)
}
