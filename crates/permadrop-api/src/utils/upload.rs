//! Common utilities for the file upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::{HeaderMap, StatusCode};
use permadrop_core::models::CustomMetadata;
use permadrop_core::{AppError, MAX_UPLOAD_SIZE_BYTES};

/// Decoded multipart upload form
pub struct UploadForm {
    pub data: Bytes,
    /// Client-supplied file name, if the file part carried one
    pub file_name: Option<String>,
    /// Effective content type: `mime` field, else the file part's content
    /// type, else `application/octet-stream`. Declared, never sniffed.
    pub content_type: String,
    /// Advisory owner identifier from the `owner` text field
    pub owner: Option<String>,
    /// Caller-supplied custom metadata from the `metadata` JSON field
    pub metadata: Option<CustomMetadata>,
}

/// Declared request body length, when the client sent one
pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.parse().ok()
}

/// Classify a failed multipart read. A tripped body limit means the payload
/// exceeded the size ceiling plus framing headroom, so it renders as a
/// size-limit error, not invalid input. The reader does not report how many
/// bytes arrived; the declared body length is the closest available figure.
fn oversize_or_invalid(status: StatusCode, content_length: Option<u64>, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::SizeLimitExceeded {
            size: content_length.unwrap_or(MAX_UPLOAD_SIZE_BYTES + 1),
            max: MAX_UPLOAD_SIZE_BYTES,
        };
    }
    AppError::InvalidInput(detail)
}

fn read_error(err: MultipartError, content_length: Option<u64>, context: &str) -> AppError {
    oversize_or_invalid(err.status(), content_length, format!("{}: {}", context, err))
}

/// Extract the upload form from a multipart request.
/// Exactly one field named "file" is required; `mime`, `owner`, and
/// `metadata` are optional text fields.
pub async fn extract_upload_form(
    mut multipart: Multipart,
    content_length: Option<u64>,
) -> Result<UploadForm, AppError> {
    let mut data: Option<Bytes> = None;
    let mut file_name: Option<String> = None;
    let mut part_content_type: Option<String> = None;
    let mut mime_field: Option<String> = None;
    let mut owner: Option<String> = None;
    let mut metadata: Option<CustomMetadata> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, content_length, "Failed to read multipart"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                file_name = field.file_name().map(|s: &str| s.to_string());
                part_content_type = field.content_type().map(|s: &str| s.to_string());

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| read_error(e, content_length, "Failed to read file data"))?;
                data = Some(bytes);
            }
            "mime" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| read_error(e, content_length, "Failed to read mime field"))?;
                if !value.is_empty() {
                    mime_field = Some(value);
                }
            }
            "owner" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| read_error(e, content_length, "Failed to read owner field"))?;
                if !value.is_empty() {
                    owner = Some(value);
                }
            }
            "metadata" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| read_error(e, content_length, "Failed to read metadata field"))?;
                metadata = Some(serde_json::from_str(&value).map_err(|e| {
                    AppError::InvalidInput(format!("Invalid metadata JSON: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    let content_type = mime_field
        .or(part_content_type)
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(UploadForm {
        data,
        file_name,
        content_type,
        owner,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_tripped_body_limit_maps_to_size_limit_error() {
        let err = oversize_or_invalid(
            StatusCode::PAYLOAD_TOO_LARGE,
            Some(3_000_000_000),
            "length limit exceeded".to_string(),
        );
        match err {
            AppError::SizeLimitExceeded { size, max } => {
                assert_eq!(size, 3_000_000_000);
                assert_eq!(max, MAX_UPLOAD_SIZE_BYTES);
            }
            other => panic!("Expected SizeLimitExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_tripped_body_limit_without_declared_length() {
        let err = oversize_or_invalid(StatusCode::PAYLOAD_TOO_LARGE, None, String::new());
        match err {
            AppError::SizeLimitExceeded { size, max } => {
                assert_eq!(size, MAX_UPLOAD_SIZE_BYTES + 1);
                assert_eq!(max, MAX_UPLOAD_SIZE_BYTES);
            }
            other => panic!("Expected SizeLimitExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_other_read_failures_map_to_invalid_input() {
        let err = oversize_or_invalid(
            StatusCode::BAD_REQUEST,
            Some(100),
            "Failed to read multipart: unexpected end of stream".to_string(),
        );
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("unexpected end of stream")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_content_length_parses_declared_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_length(&headers), None);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
        assert_eq!(content_length(&headers), Some(1024));

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("not-a-number"));
        assert_eq!(content_length(&headers), None);
    }
}
