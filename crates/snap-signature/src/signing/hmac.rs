use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::signer::MessageSigner;
use crate::error::SignatureError;

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA512 keyed by the UTF-8 bytes of a shared secret.
pub struct HmacSha512Signer {
    secret_key: Vec<u8>,
}

impl HmacSha512Signer {
    pub fn new(secret_key: &str) -> Self {
        Self {
            secret_key: secret_key.as_bytes().to_vec(),
        }
    }

    fn mac(&self, message: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha512::new_from_slice(&self.secret_key).expect("HMAC can accept any key length");
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}

impl MessageSigner for HmacSha512Signer {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignatureError> {
        Ok(self.mac(message))
    }
}

/// HMAC-SHA512 over `message`, base64-encoded. Total for any input.
pub fn sign_hmac_sha512(secret_key: &str, message: &[u8]) -> String {
    BASE64.encode(HmacSha512Signer::new(secret_key).mac(message))
}
