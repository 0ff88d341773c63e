use axum::{extract::Query, Json};
use contracts::domain::a001_order::feed::{FeedQuery, FeedResponse};
use contracts::domain::a001_order::lookup::LookupOutcome;

use crate::domain::a001_order::{repository, service};
use crate::shared::error::AppError;

/// GET /api/orders
pub async fn list_all() -> Result<Json<FeedResponse>, AppError> {
    let repo = repository::orders().ok_or(AppError::NotReady)?;
    Ok(Json(FeedResponse::list(service::list_all(repo))))
}

/// GET /api/orders/search?doc=&type=
pub async fn search(Query(query): Query<FeedQuery>) -> Result<Json<FeedResponse>, AppError> {
    let repo = repository::orders().ok_or(AppError::NotReady)?;
    let response = match service::search(repo, &query)? {
        LookupOutcome::Found(record) => FeedResponse::single(record),
        LookupOutcome::NotFound => FeedResponse::not_found(),
    };
    Ok(Json(response))
}
