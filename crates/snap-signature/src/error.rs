use axum::Json;
use axum::http::StatusCode;
use axum_core::response::{IntoResponse as AxumCoreIntoResponse, Response};

use crate::keys::KeyLoadError;
use crate::model::{ErrorResponse, ValidationError};

/// Failures of the canonicalize-and-sign pipeline.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("no PEM block found in private key")]
    KeyFormat,
    #[error("failed to parse PKCS8 private key: {0}")]
    KeyParse(#[source] rsa::pkcs8::Error),
    #[error("not an RSA key")]
    KeyType,
    #[error("failed to sign message: {0}")]
    Signing(#[from] rsa::signature::Error),
    #[error("failed to serialize body: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("body is not valid JSON: {0}")]
    InvalidJsonBody(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid request body")]
    MalformedRequest,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error loading default private key: {0}")]
    DefaultKey(#[from] KeyLoadError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MalformedRequest | ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::DefaultKey(_) | ServerError::Signature(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Trait implementation to convert this error into an axum http response
impl AxumCoreIntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
