//! Server module for building the storefront HTTP API
//!
//! This module provides a `ServerBuilder` that registers:
//! - Address book routes guarded by their rule sets
//! - The dry-run validation route for every registered operation
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::ValidationState;
