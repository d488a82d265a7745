//! Core domain entities.
//!
//! The service persists exactly one entity, [`Mapping`]. Creation goes through
//! the separate [`NewMapping`] payload so store-owned fields (`id`, `clicks`,
//! timestamps) can never be supplied by callers.

pub mod mapping;

pub use mapping::{Mapping, NewMapping};
