//! Business logic services for the application layer.

pub mod allocator;
pub mod link_service;

pub use allocator::{Allocation, CodeAllocator};
pub use link_service::{LinkService, ShortenOutcome};
