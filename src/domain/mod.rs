//! Domain layer containing the mapping entity, the store contract and click events.
//!
//! Nothing in here knows about HTTP, SQL or Redis. Concrete stores live in
//! [`crate::infrastructure::persistence`] and business rules in
//! [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - `Mapping` and its insert payload
//! - [`repositories`] - the [`repositories::MappingRepository`] contract
//! - [`store_error`] - tagged failures every store reports
//! - [`click_event`] / [`click_worker`] - fire-and-forget click counting
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a code
//! 2. A [`click_event::ClickEvent`] is pushed onto a bounded channel
//! 3. [`click_worker::run_click_worker`] drains the channel
//! 4. Each event becomes one atomic `increment_clicks` call on the store

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod store_error;

pub use store_error::StoreError;
