// Skill Matcher: dictionary-driven skill extraction, match scoring,
// learning recommendations and the optional AI summary.
// The matcher only consumes text; it does not care how the text was produced.

pub mod analysis;
pub mod dictionary;
pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod recommendations;
pub mod scoring;
pub mod summary;

