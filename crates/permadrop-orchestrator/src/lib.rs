//! Permadrop Orchestrator Contract
//!
//! This crate defines the contract between the upload gateway and the
//! storage-network upload orchestrator: the `UploadOrchestrator` trait and
//! its request/result types. Chunking, envelope encryption, transaction
//! signing, and retry policy all live behind the trait; the gateway only
//! hands over entities satisfying `UploadEntity` and consumes the created
//! records in input order.

pub mod traits;

// Re-export commonly used types
pub use traits::{
    CreatedEntity, OrchestratorError, OrchestratorResult, UploadOrchestrator, UploadRequest,
    UploadResult,
};
