// Text-recovery prompt templates.

pub const TEXT_RECOVERY_SYSTEM: &str = "\
You are a document text extractor. \
Extract ALL readable text from the given resume/document. \
Return ONLY the extracted text content, preserving the structure. No commentary.";

/// Replace `{kind}` ("PDF" | "DOCX") and `{encoded}` (base64 payload) before sending.
pub const TEXT_RECOVERY_PROMPT: &str =
    "Extract all text from this base64-encoded {kind} resume:\n{encoded}";

pub const TEXT_RECOVERY_MAX_TOKENS: u32 = 4000;
