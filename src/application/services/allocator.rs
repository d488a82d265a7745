//! Short code allocation.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::StoreError;
use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_custom_code};

/// Decision taken for a creation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Allocation {
    /// A mapping for this exact long URL already exists; nothing is created.
    Reused(Mapping),
    /// A caller-chosen alias that was free at lookup time.
    Custom { code: String, long_url: String },
    /// A freshly generated, unchecked code.
    Generated { code: String, long_url: String },
}

impl Allocation {
    pub fn code(&self) -> &str {
        match self {
            Allocation::Reused(mapping) => &mapping.code,
            Allocation::Custom { code, .. } | Allocation::Generated { code, .. } => code,
        }
    }

    pub fn long_url(&self) -> &str {
        match self {
            Allocation::Reused(mapping) => &mapping.long_url,
            Allocation::Custom { long_url, .. } | Allocation::Generated { long_url, .. } => {
                long_url
            }
        }
    }

    pub fn is_reused(&self) -> bool {
        matches!(self, Allocation::Reused(_))
    }
}

/// Translates `(long_url, alias)` into the code a new mapping should get.
///
/// Only read queries are issued. The existence checks performed here are an
/// optimization: the store's unique constraint stays authoritative and the
/// caller must still handle [`StoreError::DuplicateCode`] from `create`.
pub struct CodeAllocator<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
}

impl<R: MappingRepository + ?Sized> CodeAllocator<R> {
    pub fn new(repository: Arc<R>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Allocates a code for a creation request.
    ///
    /// # Paths
    ///
    /// - **Alias present** (non-empty after trimming): validated, then looked up
    ///   by code. Taken aliases are rejected; generation is never used instead.
    /// - **No alias**: looked up by exact long URL. An existing mapping is
    ///   returned as [`Allocation::Reused`], otherwise a code is generated.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the trimmed URL is empty or the alias
    ///   violates the length policy
    /// - [`AppError::Conflict`] if the alias is already taken
    /// - [`AppError::Internal`] if the store is unavailable
    pub async fn allocate(
        &self,
        long_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<Allocation, AppError> {
        let long_url = long_url.trim();
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "Long URL cannot be empty",
                json!({ "field": "long_url" }),
            ));
        }

        let alias = custom_alias.map(str::trim).filter(|alias| !alias.is_empty());

        match alias {
            Some(alias) => self.allocate_alias(long_url, alias).await,
            None => self.allocate_generated(long_url).await,
        }
    }

    /// Draws a new candidate from the generator.
    pub fn generate_code(&self) -> String {
        self.generator.generate()
    }

    async fn allocate_alias(&self, long_url: &str, alias: &str) -> Result<Allocation, AppError> {
        validate_custom_code(alias)?;

        match self.repository.find_by_code(alias).await {
            Ok(_) => Err(AppError::conflict(
                format!(
                    "Custom alias '{}' is already in use. Please choose another.",
                    alias
                ),
                json!({ "code": alias }),
            )),
            Err(StoreError::NotFound) => Ok(Allocation::Custom {
                code: alias.to_string(),
                long_url: long_url.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn allocate_generated(&self, long_url: &str) -> Result<Allocation, AppError> {
        match self.repository.find_by_long_url(long_url).await {
            Ok(existing) => {
                debug!(code = %existing.code, "Reusing existing mapping for long URL");
                Ok(Allocation::Reused(existing))
            }
            Err(StoreError::NotFound) => Ok(Allocation::Generated {
                code: self.generate_code(),
                long_url: long_url.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use chrono::Utc;

    struct FixedGenerator(&'static str);

    impl CodeGenerator for FixedGenerator {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    fn allocator(repo: MockMappingRepository) -> CodeAllocator<MockMappingRepository> {
        CodeAllocator::new(Arc::new(repo), Arc::new(FixedGenerator("gen12345")))
    }

    fn mapping(id: i64, code: &str, url: &str) -> Mapping {
        Mapping::new(id, code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_empty_long_url_rejected_without_store_access() {
        let repo = MockMappingRepository::new();

        let result = allocator(repo).allocate("   ", None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_no_alias_reuses_existing_mapping() {
        let mut repo = MockMappingRepository::new();
        let existing = mapping(5, "existing", "https://example.com/page");
        repo.expect_find_by_long_url()
            .withf(|url| url == "https://example.com/page")
            .times(1)
            .returning(move |_| Ok(existing.clone()));
        repo.expect_find_by_code().times(0);

        let allocation = allocator(repo)
            .allocate("https://example.com/page", None)
            .await
            .unwrap();

        assert!(allocation.is_reused());
        assert_eq!(allocation.code(), "existing");
    }

    #[tokio::test]
    async fn test_no_alias_generates_when_url_unknown() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        repo.expect_find_by_code().times(0);

        let allocation = allocator(repo)
            .allocate("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(
            allocation,
            Allocation::Generated {
                code: "gen12345".to_string(),
                long_url: "https://example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_long_url_is_trimmed_before_lookup() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_long_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let allocation = allocator(repo)
            .allocate("  https://example.com \n", None)
            .await
            .unwrap();

        assert_eq!(allocation.long_url(), "https://example.com");
    }

    #[tokio::test]
    async fn test_blank_alias_is_treated_as_absent() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        repo.expect_find_by_code().times(0);

        let allocation = allocator(repo)
            .allocate("https://example.com", Some("   "))
            .await
            .unwrap();

        assert!(matches!(allocation, Allocation::Generated { .. }));
    }

    #[tokio::test]
    async fn test_short_alias_rejected() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_find_by_long_url().times(0);

        let result = allocator(repo)
            .allocate("https://a.com", Some("abc"))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_free_alias_accepted_verbatim() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "Promo1")
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        repo.expect_find_by_long_url().times(0);

        let allocation = allocator(repo)
            .allocate("https://a.com", Some(" Promo1 "))
            .await
            .unwrap();

        assert_eq!(
            allocation,
            Allocation::Custom {
                code: "Promo1".to_string(),
                long_url: "https://a.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_taken_alias_conflicts_without_fallback() {
        let mut repo = MockMappingRepository::new();
        let taken = mapping(1, "promo1", "https://other.com");
        repo.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(taken.clone()));

        let result = allocator(repo)
            .allocate("https://a.com", Some("promo1"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_alias_lookup_failure_is_internal() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("timeout".to_string())));

        let result = allocator(repo)
            .allocate("https://a.com", Some("promo1"))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_long_url_lookup_failure_is_internal() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("timeout".to_string())));

        let result = allocator(repo).allocate("https://a.com", None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
