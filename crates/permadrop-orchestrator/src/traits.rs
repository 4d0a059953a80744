//! Upload orchestrator abstraction
//!
//! This module defines the trait the gateway calls to upload wrapped
//! entities, plus the request and result shapes of that call.

use std::sync::Arc;

use async_trait::async_trait;
use permadrop_core::models::UploadEntity;
use thiserror::Error;
use uuid::Uuid;

/// Orchestrator operation errors
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// One entity to upload, paired with its destination folder
pub struct UploadRequest {
    pub wrapped_entity: Arc<dyn UploadEntity>,
    pub dest_folder_id: Uuid,
}

/// Record describing one successfully uploaded entity.
///
/// `data_tx_id` identifies the transaction carrying the raw bytes and
/// `metadata_tx_id` the transaction carrying descriptive metadata and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEntity {
    pub entity_id: Uuid,
    pub entity_name: String,
    pub data_tx_id: String,
    pub metadata_tx_id: String,
    pub size: u64,
}

/// Result of one orchestrator call: one created record per uploaded entity,
/// in the same order as the input
#[derive(Debug, Clone, Default)]
pub struct UploadResult {
    pub created: Vec<CreatedEntity>,
}

/// Upload orchestrator abstraction
///
/// Implementations own the network pipeline (chunking, encryption, signing,
/// submission). The gateway issues one call per incoming request and awaits
/// a single result or failure; there is no partial success for a
/// single-entity upload and no retry at this layer.
#[async_trait]
pub trait UploadOrchestrator: Send + Sync {
    /// Upload the given entities, returning created records in input order
    async fn upload(&self, entities: Vec<UploadRequest>) -> OrchestratorResult<UploadResult>;
}
