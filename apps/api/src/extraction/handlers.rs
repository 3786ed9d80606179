//! Axum route handlers for resume uploads.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::{
    extract_document, validate_upload_size, DocumentKind, ExtractionSource,
};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeResponse {
    pub text: String,
    pub file_name: String,
    pub char_count: usize,
    pub kind: DocumentKind,
    pub source: ExtractionSource,
}

struct Upload {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation("No file provided".to_string()))
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload with a `file` field (PDF or DOCX, size-capped).
/// Returns the extracted plain text. Unreadable documents yield empty text, not an error.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    let kind = DocumentKind::detect(upload.content_type.as_deref(), &upload.file_name)?;
    validate_upload_size(upload.data.len(), state.config.max_upload_bytes)?;

    let outcome = extract_document(
        &upload.data,
        kind,
        &upload.file_name,
        state.recovery.as_ref(),
        &state.config.extraction_limits(),
    )
    .await;

    Ok(Json(ParseResumeResponse {
        text: outcome.text,
        file_name: upload.file_name,
        char_count: outcome.char_count,
        kind: outcome.kind,
        source: outcome.source,
    }))
}
