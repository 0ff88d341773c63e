use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a001_order::document::DocumentError;
use contracts::domain::a001_order::feed::FeedResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidDocument(#[from] DocumentError),

    #[error("Dados de pedidos ainda não carregados")]
    NotReady,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidDocument { .. } => StatusCode::BAD_REQUEST,
            AppError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(FeedResponse::failure(self.to_string()))).into_response()
    }
}
