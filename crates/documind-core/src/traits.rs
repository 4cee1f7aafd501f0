//! Core traits defining the interfaces between components.

use async_trait::async_trait;

use crate::error::Result;

/// Embedding model trait.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of document texts, one vector per input.
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query text.
    ///
    /// The model is symmetric: queries and documents share one code path.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the maximum context length in tokens.
    fn max_tokens(&self) -> usize;
}

/// Hosted chat-completion model trait.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a prompt and return the model's free-text response.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
