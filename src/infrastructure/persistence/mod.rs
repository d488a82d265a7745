//! Mapping store implementations.
//!
//! - [`PgMappingRepository`] - PostgreSQL, the production store
//! - [`MemoryMappingRepository`] - in-process store for tests and throwaway runs

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;

pub use memory_mapping_repository::MemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
