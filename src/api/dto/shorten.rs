//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Mapping;
use crate::utils::short_url::build_short_url;

/// Request to shorten a single URL.
///
/// Missing fields deserialize as empty, so an absent `long_url` is reported
/// by the same validation path as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub long_url: String,

    /// Optional custom alias; blank means "generate one".
    #[serde(default)]
    pub code: Option<String>,
}

/// Response for both newly created (201) and reused (200) mappings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    pub short_url: String,
    pub long_url: String,
    pub code: String,
}

impl ShortenResponse {
    pub fn new(base_url: &str, mapping: &Mapping) -> Self {
        Self {
            short_url: build_short_url(base_url, &mapping.code),
            long_url: mapping.long_url.clone(),
            code: mapping.code.clone(),
        }
    }
}
