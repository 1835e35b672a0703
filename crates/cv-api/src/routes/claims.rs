//! Claim verification route

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use cv_core::{ClaimRequest, VerificationResult};
use std::sync::Arc;

pub async fn validate_claim(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<VerificationResult>, StatusCode> {
    let verification = state
        .pipeline
        .process_claim(&request.input)
        .await
        .map_err(|e| {
            tracing::error!("Verification failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(VerificationResult {
        claim: request.input,
        verification,
    }))
}
