use std::sync::Arc;

use axum::http::{Method, Request, StatusCode, header};
use chrono::DateTime;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use snap_signature::{AppState, FixedClock, SignatureEngine, StaticKeyProvider, router};
use tower::ServiceExt;

const RSA_PKCS8: &str = include_str!("fixtures/rsa2048_pkcs8.pem");
const TIMESTAMP: &str = "2024-01-15T10:30:00.000+07:00";

fn test_state(keys: StaticKeyProvider) -> AppState {
    let now = DateTime::parse_from_rfc3339("2024-03-01T12:00:00.042+07:00").unwrap();
    AppState {
        engine: SignatureEngine::new(Arc::new(FixedClock(now)), Arc::new(keys)),
    }
}

fn generate_request(body: impl Into<axum::body::Body>) -> Request<axum::body::Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_key_availability() {
    let app = router(test_state(StaticKeyProvider::new(RSA_PKCS8)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok", "keyLoaded": true}));
}

#[tokio::test]
async fn health_without_default_key() {
    let app = router(test_state(StaticKeyProvider::empty()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(json_body(response).await["keyLoaded"], json!(false));
}

#[tokio::test]
async fn generate_token_with_default_key() {
    let app = router(test_state(StaticKeyProvider::new(RSA_PKCS8)));
    let body = json!({
        "signatureRequestType": "TOKEN_RSA_SHA256",
        "clientID": "client-42",
        "timestamp": TIMESTAMP,
    });

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let artifact = json_body(response).await;
    assert_eq!(artifact["stringToSign"], json!("client-42|2024-01-15T10:30:00.000+07:00"));
    assert_eq!(artifact["timestamp"], json!(TIMESTAMP));
    assert_eq!(artifact["headers"]["X-TIMESTAMP"], artifact["timestamp"]);
    assert_eq!(artifact["headers"]["X-SIGNATURE"], artifact["signature"]);
}

#[tokio::test]
async fn generate_hmac_with_structured_body_and_clock_timestamp() {
    let app = router(test_state(StaticKeyProvider::empty()));
    let body = json!({
        "signatureRequestType": "TRANSACTIONS_HMAC_SHA512",
        "method": "POST",
        "url": "/v1.0/debit",
        "body": {"amount": "1000"},
        "accessToken": "tok-123",
        "secretKey": "s3cr3t",
    });

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let artifact = json_body(response).await;
    assert_eq!(artifact["timestamp"], json!("2024-03-01T12:00:00.042+07:00"));
    assert_eq!(
        artifact["stringToSign"],
        json!(
            "POST:/v1.0/debit:tok-123:\
             071a78c49b5b55fb01f67a43e40116527224efa0aebfc02ee0408303e1746e26:\
             2024-03-01T12:00:00.042+07:00"
        )
    );
}

#[tokio::test]
async fn generate_rsa_transaction_with_supplied_key() {
    let app = router(test_state(StaticKeyProvider::empty()));
    let body = json!({
        "signatureRequestType": "TRANSACTIONS_RSA_SHA256",
        "method": "POST",
        "url": "/v1.0/debit",
        "body": "{ \"amount\" : \"1000\" }",
        "timestamp": TIMESTAMP,
        "privateKey": RSA_PKCS8,
    });

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let artifact = json_body(response).await;
    assert_eq!(
        artifact["stringToSign"],
        json!(format!(
            "POST:/v1.0/debit:071a78c49b5b55fb01f67a43e40116527224efa0aebfc02ee0408303e1746e26:{TIMESTAMP}"
        ))
    );
}

#[tokio::test]
async fn undecodable_body_returns_400() {
    let app = router(test_state(StaticKeyProvider::empty()));

    let response = app.oneshot(generate_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({"error": "Invalid request body"}));
}

#[tokio::test]
async fn unknown_signature_type_returns_400() {
    let app = router(test_state(StaticKeyProvider::empty()));
    let body = json!({"signatureRequestType": "ED25519"});

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({"error": "invalid signature type"}));
}

#[tokio::test]
async fn missing_field_returns_400() {
    let app = router(test_state(StaticKeyProvider::empty()));
    let body = json!({
        "signatureRequestType": "TRANSACTIONS_HMAC_SHA512",
        "method": "POST",
        "body": {},
    });

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "url is required for transactions"})
    );
}

#[tokio::test]
async fn missing_default_key_returns_500() {
    let app = router(test_state(StaticKeyProvider::empty()));
    let body = json!({"signatureRequestType": "TOKEN_RSA_SHA256", "clientID": "client-42"});

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Error loading default private key: private key file not found"})
    );
}

#[tokio::test]
async fn bad_key_returns_500() {
    let app = router(test_state(StaticKeyProvider::empty()));
    let body = json!({
        "signatureRequestType": "TOKEN_RSA_SHA256",
        "clientID": "client-42",
        "privateKey": "garbage",
    });

    let response = app.oneshot(generate_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "no PEM block found in private key"})
    );
}

#[tokio::test]
async fn preflight_is_answered_with_cors_headers() {
    let app = router(test_state(StaticKeyProvider::empty()));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/generate")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = router(test_state(StaticKeyProvider::empty()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
