//! Permadrop Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! size accounting shared across all Permadrop components.

pub mod cipher;
pub mod config;
pub mod error;
pub mod models;
pub mod size_policy;

// Re-export commonly used types
pub use cipher::{encrypted_data_size, EnvelopeCipher};
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use size_policy::{check_upload_size, MAX_UPLOAD_SIZE_BYTES};
