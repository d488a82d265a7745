//! In-process implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::StoreError;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;

/// Mapping store backed by a concurrent hash map keyed by code.
///
/// Mirrors the Postgres store's guarantees: inserting through the map's entry
/// API makes duplicate-code detection atomic, and increments happen under the
/// shard lock of the entry being updated. Data lives only as long as the
/// process.
#[derive(Clone, Default)]
pub struct MemoryMappingRepository {
    mappings: Arc<DashMap<String, Mapping>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings, including soft-deleted ones.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn find_by_code(&self, code: &str) -> Result<Mapping, StoreError> {
        self.mappings
            .get(code)
            .filter(|mapping| !mapping.is_deleted())
            .map(|mapping| mapping.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Mapping, StoreError> {
        self.mappings
            .iter()
            .filter(|entry| entry.long_url == long_url && !entry.is_deleted())
            .min_by_key(|entry| entry.id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        match self.mappings.entry(new_mapping.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode {
                code: new_mapping.code,
            }),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let mapping = Mapping::new(id, new_mapping.code, new_mapping.long_url, Utc::now());
                slot.insert(mapping.clone());
                Ok(mapping)
            }
        }
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        match self.mappings.get_mut(code) {
            Some(mut mapping) if !mapping.is_deleted() => {
                mapping.clicks += 1;
                mapping.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_find_by_code() {
        let repo = MemoryMappingRepository::new();

        let created = repo
            .create(NewMapping::new("promo1", "https://a.com"))
            .await
            .unwrap();
        let found = repo.find_by_code("promo1").await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.clicks, 0);
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let repo = MemoryMappingRepository::new();

        let first = repo.create(NewMapping::new("aaaa", "https://a.com")).await.unwrap();
        let second = repo.create(NewMapping::new("bbbb", "https://b.com")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_find_by_code_is_exact() {
        let repo = MemoryMappingRepository::new();
        repo.create(NewMapping::new("Promo1", "https://a.com"))
            .await
            .unwrap();

        assert_eq!(
            repo.find_by_code("promo1").await.unwrap_err(),
            StoreError::NotFound
        );
    }

    #[tokio::test]
    async fn test_soft_deleted_mapping_is_invisible_but_keeps_code() {
        let repo = MemoryMappingRepository::new();
        repo.create(NewMapping::new("gone", "https://a.com"))
            .await
            .unwrap();
        repo.mappings.get_mut("gone").unwrap().deleted_at = Some(Utc::now());

        assert!(repo.find_by_code("gone").await.unwrap_err().is_not_found());
        assert!(
            repo.find_by_long_url("https://a.com")
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            repo.create(NewMapping::new("gone", "https://b.com"))
                .await
                .unwrap_err()
                .is_duplicate_code()
        );
    }

    #[tokio::test]
    async fn test_increment_unknown_code() {
        let repo = MemoryMappingRepository::new();

        assert_eq!(
            repo.increment_clicks("nope").await.unwrap_err(),
            StoreError::NotFound
        );
    }
}
