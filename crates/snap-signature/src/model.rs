use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Signature scheme identifiers as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureType {
    #[serde(rename = "TRANSACTIONS_RSA_SHA256")]
    TransactionsRsa,
    #[serde(rename = "TRANSACTIONS_HMAC_SHA512")]
    TransactionsHmac,
    #[serde(rename = "TOKEN_RSA_SHA256")]
    Token,
}

impl SignatureType {
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureType::TransactionsRsa => "TRANSACTIONS_RSA_SHA256",
            SignatureType::TransactionsHmac => "TRANSACTIONS_HMAC_SHA512",
            SignatureType::Token => "TOKEN_RSA_SHA256",
        }
    }

    /// Whether the scheme signs with an RSA private key.
    pub fn uses_rsa_key(self) -> bool {
        !matches!(self, SignatureType::TransactionsHmac)
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRANSACTIONS_RSA_SHA256" => Ok(SignatureType::TransactionsRsa),
            "TRANSACTIONS_HMAC_SHA512" => Ok(SignatureType::TransactionsHmac),
            "TOKEN_RSA_SHA256" => Ok(SignatureType::Token),
            _ => Err(ValidationError::new(
                "signatureRequestType",
                "invalid signature type",
            )),
        }
    }
}

/// A required field is missing or the scheme is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// The `/generate` request document.
///
/// Every field is optional on the wire; [`SignatureRequest::validate`]
/// enforces the per-scheme requirements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureRequest {
    pub signature_request_type: String,

    pub method: String,
    pub url: String,
    /// A JSON string is taken as the raw body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,

    #[serde(rename = "clientID", alias = "clientId")]
    pub client_id: String,

    pub timestamp: String,

    pub private_key: String,

    pub access_token: String,
    pub secret_key: String,
}

impl SignatureRequest {
    pub fn signature_type(&self) -> Result<SignatureType, ValidationError> {
        if self.signature_request_type.is_empty() {
            return Err(ValidationError::new(
                "signatureRequestType",
                "signatureRequestType is required",
            ));
        }
        self.signature_request_type.parse()
    }

    pub fn validate(&self) -> Result<SignatureType, ValidationError> {
        let signature_type = self.signature_type()?;

        match signature_type {
            SignatureType::TransactionsRsa => {
                self.validate_transaction()?;
                require(&self.private_key, "privateKey", "privateKey is required for RSA signatures")?;
            }
            SignatureType::TransactionsHmac => {
                self.validate_transaction()?;
                require(&self.access_token, "accessToken", "accessToken is required for HMAC signatures")?;
                require(&self.secret_key, "secretKey", "secretKey is required for HMAC signatures")?;
            }
            SignatureType::Token => {
                require(&self.client_id, "clientID", "clientID is required for token generation")?;
                require(&self.private_key, "privateKey", "privateKey is required for token generation")?;
            }
        }

        Ok(signature_type)
    }

    fn validate_transaction(&self) -> Result<(), ValidationError> {
        require(&self.method, "method", "method is required for transactions")?;
        require(&self.url, "url", "url is required for transactions")?;
        if self.body.is_none() {
            return Err(ValidationError::new("body", "body is required for transactions"));
        }
        Ok(())
    }
}

fn require(value: &str, field: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Ready-to-send request headers. Mirrors the artifact's signature and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureHeaders {
    #[serde(rename = "X-SIGNATURE")]
    pub signature: String,
    #[serde(rename = "X-TIMESTAMP")]
    pub timestamp: String,
}

/// Output of one signing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureArtifact {
    pub signature: String,
    pub timestamp: String,
    pub string_to_sign: String,
    pub headers: SignatureHeaders,
}

impl SignatureArtifact {
    pub fn new(signature: String, timestamp: String, string_to_sign: String) -> Self {
        let headers = SignatureHeaders {
            signature: signature.clone(),
            timestamp: timestamp.clone(),
        };
        Self {
            signature,
            timestamp,
            string_to_sign,
            headers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub key_loaded: bool,
}
