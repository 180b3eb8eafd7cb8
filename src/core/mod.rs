//! Core module containing the validation pipeline, error types and service traits

pub mod error;
pub mod service;
pub mod validation;

pub use error::{ErrorResponse, StorefrontError};
pub use service::AddressStore;
