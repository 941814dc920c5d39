use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::engine::SignatureEngine;
use crate::error::ServerError;
use crate::model::{HealthResponse, SignatureArtifact, SignatureRequest};

#[derive(Clone)]
pub struct AppState {
    pub engine: SignatureEngine,
}

pub async fn run(host: String, port: u16, state: AppState) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, key_loaded = state.engine.key_loaded(), "Starting server");

    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin may call the service; preflight requests are answered here.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SignatureArtifact>, ServerError> {
    let request: SignatureRequest = serde_json::from_slice(&body).map_err(|err| {
        debug!(error = %err, "Rejecting undecodable request body");
        ServerError::MalformedRequest
    })?;

    let artifact = generate(&state.engine, request).inspect_err(|err| match err {
        ServerError::Validation(invalid) => {
            warn!(field = invalid.field, error = %err, "Rejecting invalid signature request");
        }
        _ => warn!(status = %err.status(), error = %err, "Signature generation failed"),
    })?;

    Ok(Json(artifact))
}

fn generate(
    engine: &SignatureEngine,
    request: SignatureRequest,
) -> Result<SignatureArtifact, ServerError> {
    let prepared = engine.prepare(request)?;
    let artifact = engine.sign(&prepared)?;

    debug!(
        signature_type = %prepared.signature_type(),
        timestamp = %artifact.timestamp,
        "Generated signature"
    );

    Ok(artifact)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        key_loaded: state.engine.key_loaded(),
    })
}
