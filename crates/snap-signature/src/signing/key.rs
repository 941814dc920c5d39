use rsa::RsaPrivateKey;
use rsa::pkcs8::{ObjectIdentifier, PrivateKeyInfo};

use crate::error::SignatureError;

/// `rsaEncryption` (PKCS #1).
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

const PEM_BEGIN: &str = "-----BEGIN";

/// Decodes a PEM-encoded PKCS8 private key into an RSA key.
///
/// The first PEM block in `pem_text` that decodes is used; text around it
/// and blocks with broken framing or base64 are skipped. The block label is
/// not inspected, so a PKCS1 payload carried under a `PRIVATE KEY` label is
/// still rejected at the PKCS8 stage.
///
/// # Errors
///
/// - [`SignatureError::KeyFormat`] when no PEM block can be extracted.
/// - [`SignatureError::KeyParse`] when the payload is not PKCS8, or the
///   embedded RSA structure is malformed.
/// - [`SignatureError::KeyType`] when the PKCS8 algorithm is not RSA.
pub fn decode_private_key(pem_text: &str) -> Result<RsaPrivateKey, SignatureError> {
    let der = first_pem_block(pem_text).ok_or(SignatureError::KeyFormat)?;

    let info = PrivateKeyInfo::try_from(der.as_slice())
        .map_err(|e| SignatureError::KeyParse(e.into()))?;

    if info.algorithm.oid != RSA_ENCRYPTION_OID {
        return Err(SignatureError::KeyType);
    }

    RsaPrivateKey::try_from(info).map_err(SignatureError::KeyParse)
}

/// Contents of the first PEM block that parses.
fn first_pem_block(text: &str) -> Option<Vec<u8>> {
    let mut rest = text;
    loop {
        let start = rest.find(PEM_BEGIN)?;
        match pem::parse(&rest[start..]) {
            Ok(block) => return Some(block.into_contents()),
            Err(_) => rest = &rest[start + PEM_BEGIN.len()..],
        }
    }
}
