//! Mapping creation and lookup service.

use std::sync::Arc;

use crate::application::services::allocator::{Allocation, CodeAllocator};
use crate::domain::StoreError;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use serde_json::json;
use tracing::{debug, info, warn};

/// Default number of insert attempts for generated codes.
pub const DEFAULT_GENERATION_ATTEMPTS: usize = 3;

/// Result of a shorten request.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortenOutcome {
    pub mapping: Mapping,
    /// `false` when an existing mapping was returned instead of creating one.
    pub created: bool,
}

/// Service for creating and resolving short links.
///
/// Wraps the [`CodeAllocator`] and performs the final insert, which is where
/// code uniqueness is actually decided.
pub struct LinkService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    allocator: CodeAllocator<R>,
    max_generation_attempts: usize,
}

impl<R: MappingRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    ///
    /// `max_generation_attempts` is clamped to at least one.
    pub fn new(
        repository: Arc<R>,
        generator: Arc<dyn CodeGenerator>,
        max_generation_attempts: usize,
    ) -> Self {
        Self {
            allocator: CodeAllocator::new(repository.clone(), generator),
            repository,
            max_generation_attempts: max_generation_attempts.max(1),
        }
    }

    /// Shortens a long URL, optionally under a caller-chosen alias.
    ///
    /// # Deduplication
    ///
    /// Without an alias, an existing mapping for the exact same long URL is
    /// returned with `created == false`.
    ///
    /// # Collisions
    ///
    /// - A custom alias rejected by the store's unique constraint (another
    ///   request claimed it after our lookup) becomes a conflict.
    /// - A generated code rejected the same way is replaced by a fresh one, up
    ///   to `max_generation_attempts` inserts in total.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty URL or an out-of-policy alias
    /// - [`AppError::Conflict`] when the alias is taken
    /// - [`AppError::Internal`] when the store is unavailable or generation
    ///   keeps colliding
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<ShortenOutcome, AppError> {
        match self.allocator.allocate(long_url, custom_alias).await? {
            Allocation::Reused(mapping) => {
                debug!(code = %mapping.code, "Reusing existing mapping");
                Ok(ShortenOutcome {
                    mapping,
                    created: false,
                })
            }
            Allocation::Custom { code, long_url } => {
                let mapping = self
                    .repository
                    .create(NewMapping::new(code, long_url))
                    .await?;

                info!(code = %mapping.code, "Created mapping with custom alias");
                Ok(ShortenOutcome {
                    mapping,
                    created: true,
                })
            }
            Allocation::Generated { code, long_url } => {
                let mapping = self.create_generated(code, long_url).await?;

                info!(code = %mapping.code, "Created mapping with generated code");
                Ok(ShortenOutcome {
                    mapping,
                    created: true,
                })
            }
        }
    }

    /// Resolves a short code to its mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::Internal`] when the store is unavailable.
    pub async fn resolve(&self, code: &str) -> Result<Mapping, AppError> {
        self.repository
            .find_by_code(code)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    AppError::not_found("Short URL not found", json!({ "code": code }))
                }
                other => other.into(),
            })
    }

    /// Probes store connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.repository.ping().await.map_err(AppError::from)
    }

    /// Inserts a generated code, regenerating on duplicate-code rejections.
    async fn create_generated(&self, first_code: String, long_url: String) -> Result<Mapping, AppError> {
        let mut code = first_code;

        for attempt in 1..=self.max_generation_attempts {
            match self
                .repository
                .create(NewMapping::new(code.clone(), long_url.clone()))
                .await
            {
                Ok(mapping) => return Ok(mapping),
                Err(StoreError::DuplicateCode { code: taken }) => {
                    warn!(
                        code = %taken,
                        attempt,
                        "Generated code collided with an existing mapping"
                    );
                    if attempt < self.max_generation_attempts {
                        code = self.allocator.generate_code();
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({
                "reason": "code generation collided repeatedly",
                "attempts": self.max_generation_attempts,
            }),
        ))
    }
}
