//! Data models for the application
//!
//! This module contains the domain data structures, organized by feature
//! area: the custom metadata attachment model and the upload entity wrapper.

mod metadata;
mod upload;

// Re-export all models for convenient imports
pub use metadata::*;
pub use upload::*;
