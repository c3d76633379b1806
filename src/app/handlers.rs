use crate::app::error::ApiError;
use crate::app::AppState;
use crate::domain::model::{ReleaseRecord, Source};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

type ReleaseResponse = Result<Json<Arc<Vec<ReleaseRecord>>>, ApiError>;

async fn release_information(state: &AppState, source: Source) -> ReleaseResponse {
    let records = state.cache.get(source).await?;
    Ok(Json(records))
}

/// `GET /api/windows11`
pub async fn windows11(State(state): State<AppState>) -> ReleaseResponse {
    release_information(&state, Source::Windows11).await
}

/// `GET /api/windows10`
pub async fn windows10(State(state): State<AppState>) -> ReleaseResponse {
    release_information(&state, Source::Windows10).await
}
