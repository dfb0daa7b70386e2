//! Multipart upload handling

use std::path::PathBuf;

use actix_multipart::Multipart;
use actix_web::web;
use futures::StreamExt;

use isocert_common::IsocertError;

use super::storage::sanitize_filename;

const FILE_FIELD: &str = "file";

/// An uploaded file read from the `file` field of a multipart body
#[derive(Debug)]
pub struct UploadedFile {
    /// Final path component of the client filename
    pub filename: String,
    pub data: Vec<u8>,
}

/// Read the `file` field of a multipart payload into memory
///
/// Malformed bodies and a missing `file` field are validation errors.
pub async fn read_file_field(mut payload: Multipart) -> Result<UploadedFile, IsocertError> {
    while let Some(field_result) = payload.next().await {
        let mut field = field_result.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read multipart field");
            IsocertError::IllegalArgument(format!("file: {e}"))
        })?;

        let Some(content_disposition) = field.content_disposition() else {
            continue;
        };
        if content_disposition.get_name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = sanitize_filename(content_disposition.get_filename().unwrap_or_default())?;

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk_result) = field.next().await {
            let chunk = chunk_result.map_err(|e| {
                tracing::warn!(error = %e, "Failed to read multipart chunk");
                IsocertError::IllegalArgument(format!("file: {e}"))
            })?;
            data.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile { filename, data });
    }

    Err(IsocertError::IllegalArgument(
        "file: field required".to_string(),
    ))
}

/// Write bytes to `path` on the blocking thread pool
pub async fn write_file(path: PathBuf, data: Vec<u8>) -> anyhow::Result<()> {
    web::block(move || std::fs::write(&path, data)).await??;
    Ok(())
}
