//! Repository trait definitions for the domain layer.
//!
//! The store is reached only through [`MappingRepository`]. Implementations live
//! in `crate::infrastructure::persistence`; a `mockall` mock is generated for
//! unit tests.
//!
//! # Testing
//!
//! See `tests/repository_mapping.rs` for the Postgres contract tests and
//! `tests/memory_store.rs` for the in-memory ones.

pub mod mapping_repository;

pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
