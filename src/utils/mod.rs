//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`short_url`] - Base URL resolution and short URL formatting
//! - [`db_error`] - Postgres error classification

pub mod code_generator;
pub mod db_error;
pub mod short_url;
