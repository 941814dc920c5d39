use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use sha2::Sha256;

use super::key::decode_private_key;
use super::signer::MessageSigner;
use crate::error::SignatureError;

/// RSA PKCS#1 v1.5 signer with SHA-256 digest.
///
/// Owns the decoded key for the duration of a single signing call.
/// The OS CSPRNG drives RSA blinding; the signature bytes themselves are
/// deterministic for a given key and message.
pub struct RsaSha256Signer {
    signing_key: SigningKey<Sha256>,
}

impl RsaSha256Signer {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        Self {
            signing_key: SigningKey::<Sha256>::new(private_key),
        }
    }

    /// Decode a PKCS8 PEM key and wrap it.
    pub fn from_pem(pem_text: &str) -> Result<Self, SignatureError> {
        Ok(Self::new(decode_private_key(pem_text)?))
    }
}

impl MessageSigner for RsaSha256Signer {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignatureError> {
        let signature = self.signing_key.try_sign_with_rng(&mut OsRng, message)?;
        Ok(signature.to_vec())
    }
}

/// SHA256withRSA over `message`, base64-encoded.
///
/// # Errors
///
/// Returns [`SignatureError::Signing`] when the key cannot hold a PKCS#1 v1.5
/// encoded SHA-256 digest, or the random source fails.
pub fn sign_rsa_sha256(message: &[u8], key: RsaPrivateKey) -> Result<String, SignatureError> {
    RsaSha256Signer::new(key).sign_base64(message)
}
