//! Upload entity wrapper
//!
//! `UploadEntity` is the capability set the upload orchestrator requires of
//! anything it uploads; any type satisfying it is uploadable regardless of
//! how its bytes were sourced. `UploadableFile` is the in-memory-buffer
//! implementation: the whole file is materialized before wrapping, held for
//! one request/response cycle, and consumed exactly once.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::cipher;
use crate::error::AppError;
use crate::size_policy::check_upload_size;

use super::metadata::CustomMetadata;

/// Snapshot of an entity's descriptive state, recomputed on every call.
/// The timestamp is the wall clock at gather time, not construction time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FileInfo {
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
    pub size: u64,
}

/// Capability set required by the upload orchestrator.
///
/// All getters are total: a validly constructed entity never fails to
/// answer. `last_modified` reads the clock at call time, so repeated calls
/// may return increasing timestamps.
pub trait UploadEntity: Send + Sync {
    /// Declared content type, verbatim as supplied (never sniffed)
    fn content_type(&self) -> &str;

    /// Plaintext size in bytes
    fn size(&self) -> u64;

    /// Wall-clock time at the moment of the call
    fn last_modified(&self) -> DateTime<Utc>;

    /// Base name used for display and identification, opaque to this layer
    fn base_name(&self) -> &str;

    /// The wrapped bytes by shared reference; never copied, never mutated
    fn data_buffer(&self) -> &[u8];

    /// Custom metadata routed to the transaction attachment surfaces
    fn custom_metadata(&self) -> Option<&CustomMetadata>;

    /// Descriptive snapshot, recomputed on each call
    fn gather_file_info(&self) -> FileInfo {
        FileInfo {
            content_type: self.content_type().to_string(),
            last_modified: self.last_modified(),
            size: self.size(),
        }
    }

    /// Projected ciphertext size after envelope encryption. Delegates to the
    /// cipher module; deterministic and always >= `size()`.
    fn encrypted_data_size(&self) -> u64 {
        cipher::encrypted_data_size(self.size())
    }
}

/// An in-memory file buffer wrapped for upload
pub struct UploadableFile {
    buffer: Bytes,
    content_type: String,
    file_name: String,
    custom_metadata: Option<CustomMetadata>,
}

impl UploadableFile {
    /// Wrap a buffer for upload.
    ///
    /// The size ceiling is the only validation performed here; content type
    /// and file name are accepted as-is and are the caller's responsibility.
    /// Fails with `AppError::SizeLimitExceeded` when the buffer exceeds the
    /// plaintext ceiling; the check runs once and is never repeated.
    pub fn new(
        buffer: Bytes,
        content_type: impl Into<String>,
        file_name: impl Into<String>,
        custom_metadata: Option<CustomMetadata>,
    ) -> Result<Self, AppError> {
        check_upload_size(buffer.len() as u64)?;
        Ok(Self {
            buffer,
            content_type: content_type.into(),
            file_name: file_name.into(),
            custom_metadata,
        })
    }
}

impl UploadEntity for UploadableFile {
    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn size(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn last_modified(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn base_name(&self) -> &str {
        &self.file_name
    }

    fn data_buffer(&self) -> &[u8] {
        &self.buffer
    }

    fn custom_metadata(&self) -> Option<&CustomMetadata> {
        self.custom_metadata.as_ref()
    }
}
