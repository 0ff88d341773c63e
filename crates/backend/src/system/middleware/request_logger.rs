use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{FixedOffset, Utc};

/// Brasília time for the console timestamps.
const BRT_OFFSET_SECS: i32 = 3 * 3600;

/// Request logging middleware
///
/// Logs method, path, status and duration. Timestamps are in BRT (UTC-3).
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let timestamp = match FixedOffset::west_opt(BRT_OFFSET_SECS) {
        Some(brt) => Utc::now().with_timezone(&brt).format("%H:%M:%S").to_string(),
        None => Utc::now().format("%H:%M:%S").to_string(),
    };
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            "{} | {:>5}ms | {} {:>6} {}",
            timestamp,
            duration.as_millis(),
            status.as_u16(),
            method,
            path
        );
    } else {
        tracing::info!(
            "{} | {:>5}ms | {} {:>6} {}",
            timestamp,
            duration.as_millis(),
            status.as_u16(),
            method,
            path
        );
    }

    response
}
