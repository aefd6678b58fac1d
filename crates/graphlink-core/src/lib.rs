//! graphlink-core: Shared configuration, operation vocabulary, and error handling.
//!
//! This crate provides the pieces every GraphLink component agrees on:
//! - Settings resolution (config file, environment, defaults)
//! - The `Operation` enum naming the six graph operations
//! - The startup error type

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::Settings;
pub use crate::error::GraphLinkError;
pub use crate::types::Operation;
