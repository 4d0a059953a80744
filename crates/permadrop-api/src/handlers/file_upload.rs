//! File upload handler
//!
//! Decodes the multipart form, wraps the buffer into an upload entity, and
//! hands it to the orchestrator with the configured destination folder. The
//! user-visible result is the first created record's data transaction id.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use http::HeaderMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use permadrop_core::models::{CustomMetadata, UploadEntity, UploadableFile};
use permadrop_core::AppError;
use permadrop_orchestrator::UploadRequest;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{content_length, extract_upload_form};

/// Response for a successful upload
#[derive(Debug, Serialize, ToSchema)]
pub struct FileUploadResponse {
    /// Transaction id of the data transaction carrying the file's bytes
    pub data_tx_id: String,
}

/// Merge the advisory owner identifier into the metadata surfaces.
/// Owner is attached as a JSON field and a metadata-transaction tag; it is
/// metadata only and never changes who owns or pays for the upload.
fn merge_owner(metadata: Option<CustomMetadata>, owner: Option<String>) -> Option<CustomMetadata> {
    let metadata = match owner {
        Some(owner) => Some(
            metadata
                .unwrap_or_default()
                .with_json_field("Owner", JsonValue::String(owner.clone()))
                .with_metadata_tag("Owner", vec![owner]),
        ),
        None => metadata,
    };
    metadata.filter(|m| !m.is_empty())
}

#[utoipa::path(
    post,
    path = "/api/v0/files",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = FileUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Storage network upload failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<FileUploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart, content_length(&headers)).await?;

    let file_name = form
        .file_name
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
    let metadata = merge_owner(form.metadata, form.owner);

    let entity = UploadableFile::new(form.data, form.content_type, file_name, metadata)?;
    tracing::debug!(
        file_name = entity.base_name(),
        size = entity.size(),
        "Wrapped upload entity"
    );

    let result = state
        .orchestrator
        .upload(vec![UploadRequest {
            wrapped_entity: Arc::new(entity),
            dest_folder_id: state.config.dest_folder_id,
        }])
        .await?;

    let created = result.created.first().ok_or_else(|| {
        AppError::Internal("Orchestrator returned no created entities".to_string())
    })?;

    tracing::info!(
        entity_name = %created.entity_name,
        data_tx_id = %created.data_tx_id,
        metadata_tx_id = %created.metadata_tx_id,
        "File uploaded"
    );

    Ok(Json(FileUploadResponse {
        data_tx_id: created.data_tx_id.clone(),
    }))
}
