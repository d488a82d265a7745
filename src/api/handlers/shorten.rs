//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::resolve_base_url;

/// Creates (or reuses) a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/page", "code": "promo1" }
/// ```
///
/// `code` is optional. Without it, submitting the same `long_url` again
/// returns the existing mapping.
///
/// # Response
///
/// ```json
/// {
///   "short_url": "https://sho.rt/promo1",
///   "long_url": "https://example.com/page",
///   "code": "promo1"
/// }
/// ```
///
/// - **201 Created** for a new mapping
/// - **200 OK** when an existing mapping was reused
///
/// # Errors
///
/// - 400 for a malformed body, empty `long_url`, or an alias shorter than 4 characters
/// - 409 when the alias is already taken
/// - 500 on store failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(request) = payload?;

    let base_url = resolve_base_url(state.base_domain.as_deref(), &headers)?;

    let outcome = state
        .link_service
        .shorten(&request.long_url, request.code.as_deref())
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ShortenResponse::new(&base_url, &outcome.mapping))))
}
