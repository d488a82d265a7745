//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::MappingRepository`]
//! contract and expose the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::allocator::CodeAllocator`] - Decides which code a request gets
//! - [`services::link_service::LinkService`] - Creates and resolves mappings

pub mod services;
