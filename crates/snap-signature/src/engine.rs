use std::sync::Arc;

use crate::clock::{Clock, SystemClock, format_timestamp};
use crate::encoding::{
    RequestBody, body_digest, token_string_to_sign, transactions_hmac_string_to_sign,
    transactions_rsa_string_to_sign,
};
use crate::error::{ServerError, SignatureError};
use crate::keys::KeyProvider;
use crate::model::{SignatureArtifact, SignatureRequest, SignatureType};
use crate::signing::{HmacSha512Signer, MessageSigner, RsaSha256Signer};

/// A validated signing request, one variant per scheme.
///
/// A `timestamp` of `None` (or empty) is filled from the engine's clock at
/// signing time, so signing the same value twice without one yields two
/// different artifacts.
#[derive(Debug, Clone, PartialEq)]
pub enum SigningRequest {
    TransactionsRsa {
        method: String,
        url: String,
        body: Option<RequestBody>,
        timestamp: Option<String>,
        private_key_pem: String,
    },
    TransactionsHmac {
        method: String,
        url: String,
        body: Option<RequestBody>,
        timestamp: Option<String>,
        access_token: String,
        secret_key: String,
    },
    Token {
        client_id: String,
        timestamp: Option<String>,
        private_key_pem: String,
    },
}

impl SigningRequest {
    pub fn signature_type(&self) -> SignatureType {
        match self {
            SigningRequest::TransactionsRsa { .. } => SignatureType::TransactionsRsa,
            SigningRequest::TransactionsHmac { .. } => SignatureType::TransactionsHmac,
            SigningRequest::Token { .. } => SignatureType::Token,
        }
    }

    /// The caller-supplied timestamp, if any.
    pub fn timestamp(&self) -> Option<&str> {
        let timestamp = match self {
            SigningRequest::TransactionsRsa { timestamp, .. }
            | SigningRequest::TransactionsHmac { timestamp, .. }
            | SigningRequest::Token { timestamp, .. } => timestamp.as_deref(),
        };
        timestamp.filter(|ts| !ts.is_empty())
    }

    /// Builds the exact string that gets signed for `timestamp`.
    pub fn string_to_sign(&self, timestamp: &str) -> Result<String, SignatureError> {
        let string_to_sign = match self {
            SigningRequest::TransactionsRsa {
                method, url, body, ..
            } => {
                let digest = body_digest(body.as_ref())?;
                transactions_rsa_string_to_sign(method, url, &digest, timestamp)
            }
            SigningRequest::TransactionsHmac {
                method,
                url,
                body,
                access_token,
                ..
            } => {
                let digest = body_digest(body.as_ref())?;
                transactions_hmac_string_to_sign(method, url, access_token, &digest, timestamp)
            }
            SigningRequest::Token { client_id, .. } => token_string_to_sign(client_id, timestamp),
        };
        Ok(string_to_sign)
    }

    /// The signer for this scheme. RSA keys are decoded from PEM here.
    pub fn signer(&self) -> Result<Box<dyn MessageSigner>, SignatureError> {
        let signer: Box<dyn MessageSigner> = match self {
            SigningRequest::TransactionsRsa {
                private_key_pem, ..
            }
            | SigningRequest::Token {
                private_key_pem, ..
            } => Box::new(RsaSha256Signer::from_pem(private_key_pem)?),
            SigningRequest::TransactionsHmac { secret_key, .. } => {
                Box::new(HmacSha512Signer::new(secret_key))
            }
        };
        Ok(signer)
    }
}

/// Canonicalizes and signs requests.
///
/// Holds no per-request state; one engine can serve concurrent callers.
/// Key material is decoded from PEM on every call and dropped afterwards.
#[derive(Clone)]
pub struct SignatureEngine {
    clock: Arc<dyn Clock>,
    keys: Arc<dyn KeyProvider>,
}

impl SignatureEngine {
    pub fn new(clock: Arc<dyn Clock>, keys: Arc<dyn KeyProvider>) -> Self {
        Self { clock, keys }
    }

    pub fn with_system_clock(keys: Arc<dyn KeyProvider>) -> Self {
        Self::new(Arc::new(SystemClock), keys)
    }

    /// Whether the default key provider currently yields a key.
    pub fn key_loaded(&self) -> bool {
        self.keys.is_available()
    }

    /// Turns a wire request into a [`SigningRequest`].
    ///
    /// RSA schemes without a `privateKey` get the provider's default key
    /// before validation runs.
    pub fn prepare(&self, mut request: SignatureRequest) -> Result<SigningRequest, ServerError> {
        let signature_type = request.signature_type()?;
        if signature_type.uses_rsa_key() && request.private_key.is_empty() {
            request.private_key = self.keys.load()?;
        }
        request.validate()?;

        let timestamp = Some(request.timestamp).filter(|ts| !ts.is_empty());
        let body = request.body.map(RequestBody::from_json);

        let prepared = match signature_type {
            SignatureType::TransactionsRsa => SigningRequest::TransactionsRsa {
                method: request.method,
                url: request.url,
                body,
                timestamp,
                private_key_pem: request.private_key,
            },
            SignatureType::TransactionsHmac => SigningRequest::TransactionsHmac {
                method: request.method,
                url: request.url,
                body,
                timestamp,
                access_token: request.access_token,
                secret_key: request.secret_key,
            },
            SignatureType::Token => SigningRequest::Token {
                client_id: request.client_id,
                timestamp,
                private_key_pem: request.private_key,
            },
        };
        Ok(prepared)
    }

    /// Signs `request` and assembles the artifact.
    ///
    /// The timestamp is resolved once and used for both the string-to-sign
    /// and the returned headers.
    pub fn sign(&self, request: &SigningRequest) -> Result<SignatureArtifact, SignatureError> {
        let timestamp = match request.timestamp() {
            Some(timestamp) => timestamp.to_owned(),
            None => format_timestamp(self.clock.now()),
        };

        let string_to_sign = request.string_to_sign(&timestamp)?;

        let signature = request.signer()?.sign_base64(string_to_sign.as_bytes())?;

        Ok(SignatureArtifact::new(signature, timestamp, string_to_sign))
    }
}
