use crate::domain::order::Platform;
use crate::error::{ErrorEnvelope, IngestionError};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn all_offers_webhook(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    ingest(state, Platform::AllOffers, payload).await
}

pub async fn world_market_webhook(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    ingest(state, Platform::WorldMarket, payload).await
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn ingest(
    state: AppState,
    platform: Platform,
    payload: serde_json::Value,
) -> axum::response::Response {
    match state.ingestion.ingest(platform, &payload).await {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(e) => {
            tracing::warn!(platform = platform.as_str(), error = %e, "webhook rejected");
            (status_for(&e), Json(ErrorEnvelope::from_ingestion(&e))).into_response()
        }
    }
}

fn status_for(e: &IngestionError) -> StatusCode {
    match e {
        IngestionError::UnknownPaymentMethod(_)
        | IngestionError::UnknownTransactionStatus(_)
        | IngestionError::UnsupportedCurrency(_)
        | IngestionError::InvalidTimestamp { .. }
        | IngestionError::InvalidAmount { .. }
        | IngestionError::InvalidQuantity { .. }
        | IngestionError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        IngestionError::CurrencyRateUnavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        IngestionError::DeniedTransition { .. } => StatusCode::CONFLICT,
        IngestionError::StorageConflict { .. } | IngestionError::StorageUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        IngestionError::AdapterNotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
