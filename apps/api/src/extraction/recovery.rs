//! Text recovery: pluggable, best-effort fallback for documents the heuristics cannot read.
//!
//! Default: `NoopTextRecovery` (fails immediately, no network).
//! With `AI_API_URL` set: `LlmTextRecovery`, which asks the chat endpoint to transcribe
//! a base64 payload of the document.
//!
//! `AppState` holds an `Arc<dyn TextRecovery>`, chosen at startup from config.

use async_trait::async_trait;
use tracing::debug;

use crate::extraction::prompts::{
    TEXT_RECOVERY_MAX_TOKENS, TEXT_RECOVERY_PROMPT, TEXT_RECOVERY_SYSTEM,
};
use crate::extraction::DocumentKind;
use crate::llm_client::{LlmClient, LlmError};

/// What the recovery backend receives: a size-capped base64 encoding of the upload.
#[derive(Debug, Clone)]
pub struct RecoveryRequest<'a> {
    pub kind: DocumentKind,
    pub file_name: &'a str,
    pub encoded: &'a str,
}

#[async_trait]
pub trait TextRecovery: Send + Sync {
    /// Returns raw recovered text. Callers validate and sanitize it.
    async fn recover_text(&self, request: &RecoveryRequest<'_>) -> Result<String, LlmError>;
}

/// Recovery disabled: always fails with `LlmError::Disabled`.
pub struct NoopTextRecovery;

#[async_trait]
impl TextRecovery for NoopTextRecovery {
    async fn recover_text(&self, _request: &RecoveryRequest<'_>) -> Result<String, LlmError> {
        Err(LlmError::Disabled)
    }
}

pub struct LlmTextRecovery {
    llm: LlmClient,
    model: String,
}

impl LlmTextRecovery {
    pub fn new(llm: LlmClient, model: String) -> Self {
        Self { llm, model }
    }
}

#[async_trait]
impl TextRecovery for LlmTextRecovery {
    async fn recover_text(&self, request: &RecoveryRequest<'_>) -> Result<String, LlmError> {
        debug!(
            "Requesting text recovery for '{}' ({} base64 chars)",
            request.file_name,
            request.encoded.len()
        );
        let prompt = TEXT_RECOVERY_PROMPT
            .replace("{kind}", request.kind.label())
            .replace("{encoded}", request.encoded);
        self.llm
            .complete_text(
                &self.model,
                TEXT_RECOVERY_SYSTEM,
                &prompt,
                TEXT_RECOVERY_MAX_TOKENS,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_noop_recovery_is_disabled() {
        let request = RecoveryRequest {
            kind: DocumentKind::Pdf,
            file_name: "resume.pdf",
            encoded: "",
        };
        let err = NoopTextRecovery.recover_text(&request).await.unwrap_err();
        assert!(matches!(err, LlmError::Disabled));
    }

    #[tokio::test]
    async fn test_llm_recovery_sends_model_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "extract-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Jane Doe\nData Engineer"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let llm = LlmClient::new(server.uri(), None, Duration::from_secs(5))
            .unwrap()
            .with_max_retries(1);
        let recovery = LlmTextRecovery::new(llm, "extract-model".to_string());
        let request = RecoveryRequest {
            kind: DocumentKind::Docx,
            file_name: "resume.docx",
            encoded: "UEsDBA==",
        };

        let text = recovery.recover_text(&request).await.unwrap();
        assert_eq!(text, "Jane Doe\nData Engineer");
    }
}
