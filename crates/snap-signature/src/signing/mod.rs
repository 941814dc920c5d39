mod signer;
mod digest;
mod key;
mod rsa;
mod hmac;

pub use signer::MessageSigner;
pub use digest::hex_sha256;
pub use key::decode_private_key;
pub use self::rsa::{RsaSha256Signer, sign_rsa_sha256};
pub use self::hmac::{HmacSha512Signer, sign_hmac_sha512};
