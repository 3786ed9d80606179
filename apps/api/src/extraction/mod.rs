//! Text Extractor: raw document bytes to sanitized plain text.
//!
//! `extract_text` is the pure, synchronous heuristic. `extract_document` wraps it with
//! the optional recovery fallback and output truncation. Nothing in here fails on
//! unreadable input; the worst case is an empty string.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod recovery;
pub mod sanitize;

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extraction::docx::extract_docx_text;
use crate::extraction::pdf::extract_pdf_text;
use crate::extraction::recovery::{RecoveryRequest, TextRecovery};
use crate::extraction::sanitize::{is_readable_text, sanitize_text, truncate_chars};
use crate::llm_client::{strip_code_fences, LlmError};

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Heuristic output shorter than this triggers the recovery fallback.
pub const MIN_CONFIDENT_CHARS: usize = 50;

/// Only the first 100 KB of a document is sent for recovery.
pub const RECOVERY_BYTE_CAP: usize = 100_000;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Only PDF and DOCX files are supported (got '{0}')")]
    UnsupportedFormat(String),

    #[error("File size must be under {limit} bytes (got {size})")]
    TooLarge { size: usize, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Page-content-stream format with `BT … ET` text objects.
    Pdf,
    /// Word-processor XML with `<w:t>` runs.
    Docx,
}

impl DocumentKind {
    /// Infers the kind from the declared MIME type or, failing that, the file name.
    pub fn detect(content_type: Option<&str>, file_name: &str) -> Result<Self, ExtractionError> {
        let name = file_name.to_ascii_lowercase();
        let mime = content_type.unwrap_or_default();

        if mime == PDF_MIME || name.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if mime == DOCX_MIME || name.ends_with(".docx") {
            Ok(DocumentKind::Docx)
        } else {
            let declared = if mime.is_empty() { file_name } else { mime };
            Err(ExtractionError::UnsupportedFormat(declared.to_string()))
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
        }
    }
}

/// Rejects uploads over `limit` bytes.
pub fn validate_upload_size(size: usize, limit: usize) -> Result<(), ExtractionError> {
    if size > limit {
        return Err(ExtractionError::TooLarge { size, limit });
    }
    Ok(())
}

/// Heuristic extraction only. Returns an empty string when nothing readable is found.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> String {
    match kind {
        DocumentKind::Pdf => extract_pdf_text(bytes),
        DocumentKind::Docx => extract_docx_text(bytes),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Heuristic,
    Recovered,
    /// Nothing readable could be recovered.
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub text: String,
    /// Length before truncation.
    pub char_count: usize,
    pub kind: DocumentKind,
    pub source: ExtractionSource,
}

#[derive(Debug, Clone)]
pub struct ExtractionLimits {
    pub max_text_chars: usize,
    pub recovery_timeout: Duration,
}

/// Full extraction pipeline: heuristics, then recovery when the heuristic result is
/// unreadable or short, then a final sanitize and truncation.
pub async fn extract_document(
    bytes: &[u8],
    kind: DocumentKind,
    file_name: &str,
    recovery: &dyn TextRecovery,
    limits: &ExtractionLimits,
) -> ExtractionOutcome {
    let mut text = extract_text(bytes, kind);
    let mut source = if text.is_empty() {
        ExtractionSource::None
    } else {
        ExtractionSource::Heuristic
    };

    if !is_readable_text(&text) || text.chars().count() < MIN_CONFIDENT_CHARS {
        debug!(
            "Heuristic extraction of '{}' yielded {} chars; attempting recovery",
            file_name,
            text.chars().count()
        );
        if let Some(recovered) = try_recover(bytes, kind, file_name, recovery, limits).await {
            text = recovered;
            source = ExtractionSource::Recovered;
        }
    }

    let text = sanitize_text(&text);
    let char_count = text.chars().count();
    let text = truncate_chars(&text, limits.max_text_chars).to_string();

    info!(
        "Extracted {} chars from '{}' ({:?}, source={:?})",
        char_count, file_name, kind, source
    );

    ExtractionOutcome {
        text,
        char_count,
        kind,
        source,
    }
}

async fn try_recover(
    bytes: &[u8],
    kind: DocumentKind,
    file_name: &str,
    recovery: &dyn TextRecovery,
    limits: &ExtractionLimits,
) -> Option<String> {
    let capped = &bytes[..bytes.len().min(RECOVERY_BYTE_CAP)];
    let encoded = BASE64.encode(capped);
    let request = RecoveryRequest {
        kind,
        file_name,
        encoded: &encoded,
    };

    match tokio::time::timeout(limits.recovery_timeout, recovery.recover_text(&request)).await {
        Ok(Ok(raw)) => {
            let candidate = strip_code_fences(&raw);
            if is_readable_text(candidate) {
                Some(sanitize_text(candidate))
            } else {
                warn!("Recovered text for '{file_name}' failed the readability test; ignoring");
                None
            }
        }
        Ok(Err(LlmError::Disabled)) => {
            debug!("Text recovery disabled; keeping heuristic result");
            None
        }
        Ok(Err(e)) => {
            warn!("Text recovery for '{file_name}' failed: {e}");
            None
        }
        Err(_) => {
            warn!(
                "Text recovery for '{file_name}' timed out after {}s",
                limits.recovery_timeout.as_secs()
            );
            None
        }
    }
}
