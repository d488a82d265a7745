//! Infrastructure layer for external integrations.
//!
//! Implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`persistence`] - Mapping store implementations

pub mod cache;
pub mod persistence;
