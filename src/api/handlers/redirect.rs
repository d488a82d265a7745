//! Handler for short URL redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check the cache for the code
/// 2. On a miss (or cache error), look the code up in the store
/// 3. Warm the cache in the background
/// 4. Enqueue a click event for the background worker
/// 5. Return 302 Found
///
/// # Click Tracking
///
/// Clicks are fire-and-forget. A full or closed queue drops the click; the
/// redirect still succeeds.
///
/// # Errors
///
/// - 404 if the code doesn't exist
/// - 500 on store failures
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = match state.cache.get_long_url(&code).await {
        Ok(Some(cached)) => {
            debug!(code = %code, "Cache hit");
            cached
        }
        Ok(None) => {
            let mapping = state.link_service.resolve(&code).await?;

            let cache = state.cache.clone();
            let cached_code = code.clone();
            let cached_url = mapping.long_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.put_long_url(&cached_code, &cached_url).await {
                    warn!(code = %cached_code, error = %e, "Failed to cache redirect");
                }
            });

            mapping.long_url
        }
        Err(e) => {
            warn!(code = %code, error = %e, "Cache lookup failed, using store");
            state.link_service.resolve(&code).await?.long_url
        }
    };

    let location = HeaderValue::try_from(long_url.as_str()).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "code": code }),
        )
    })?;

    match state.click_sender.try_send(ClickEvent::new(code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(code = %event.code, "Click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            warn!(code = %event.code, "Click queue closed, dropping click");
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
