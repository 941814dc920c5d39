use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::SignatureError;

/// Trait for signing a canonical string-to-sign.
///
/// Implementations are sync because signing is CPU-bound.
/// A signer is built for one request and dropped with it.
pub trait MessageSigner: Send + Sync {
    /// Sign message bytes. Returns raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignatureError>;

    /// Sign and base64-encode (standard alphabet, padded).
    fn sign_base64(&self, message: &[u8]) -> Result<String, SignatureError> {
        let signature = self.sign(message)?;
        Ok(BASE64.encode(signature))
    }
}
