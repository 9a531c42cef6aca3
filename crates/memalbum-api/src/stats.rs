use axum::{Json, extract::State};

use memalbum_types::api::{HealthResponse, StatsResponse};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::with_db;

/// GET /api/stats: total cards and messages.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let (cards, messages) =
        with_db(&state, |db| Ok((db.count_cards()?, db.count_messages()?))).await?;

    Ok(Json(StatsResponse { cards, messages }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
