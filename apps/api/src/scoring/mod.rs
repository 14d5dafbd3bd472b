// Prompt scoring: request validation, the completion call, and verdict extraction.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod verdict;
