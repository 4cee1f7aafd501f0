//! documind-qa - Synthetic QA pair generation
//!
//! This crate feeds corpus chunks through prompt templates into a hosted
//! chat model, extracts a JSON answer out of the free-text response, and
//! accumulates a QA dataset with periodic checkpointing. A failed chunk
//! is logged and skipped; it never aborts the batch.

mod anthropic;
mod chunk;
mod extract;
mod generator;
mod prompts;

pub use anthropic::AnthropicClient;
pub use chunk::{chunk_corpus, chunk_document, QaChunk};
pub use extract::parse_qa_response;
pub use generator::{QaGenerator, QaReport};

// Re-export the model trait for convenience
pub use documind_core::ChatModel;
