// Analysis summary prompt templates.

pub const SUMMARY_SYSTEM: &str = "\
You are a career coach. \
Given a student's skill analysis, provide a brief 3-4 sentence personalized recommendation summary. \
Be encouraging but specific.";

/// Replace `{role}`, `{match}`, `{have}` and `{missing}` before sending.
pub const SUMMARY_PROMPT: &str = "Role: {role}\nMatch: {match}%\nHave: {have}\nMissing: {missing}";

pub const SUMMARY_MAX_TOKENS: u32 = 200;
