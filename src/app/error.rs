use crate::utils::error::RefreshError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Refresh(e) => {
                // 細節只寫進日誌，不回傳給客戶端
                tracing::error!(
                    "❌ Error scraping {}: {} (source: {})",
                    e.source_id.display_name(),
                    e.cause,
                    e.source_id
                );

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!(
                        "Error scraping {} release information",
                        e.source_id.display_name()
                    ),
                )
                    .into_response()
            }
        }
    }
}
