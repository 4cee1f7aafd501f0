//! Deterministic mock embedder for tests.

use async_trait::async_trait;

use documind_core::{DocumindError, Embedder, Result};

use crate::onnx::l2_normalize;

/// A mock embedder that derives vectors from the input bytes.
///
/// Deterministic, so tests can rely on identical inputs embedding
/// identically without any model files on disk.
#[derive(Debug)]
pub struct MockEmbedder {
    dimension: usize,
    max_tokens: usize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            dimension: 768,
            max_tokens: 2048,
        }
    }

    pub fn with_dimensions(dimension: usize, max_tokens: usize) -> Self {
        Self {
            dimension,
            max_tokens,
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let seed = text
            .bytes()
            .fold(1469598103934665603u64, |acc, b| {
                (acc ^ b as u64).wrapping_mul(1099511628211)
            });
        let mut embedding = vec![0.0f32; self.dimension];
        let mut state = seed;
        for v in embedding.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            *v = ((state >> 32) as f32 / (1u64 << 31) as f32) - 1.0;
        }
        l2_normalize(embedding)
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_documents(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| DocumindError::embedding("No embedding returned"))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedder_shape() {
        let embedder = MockEmbedder::new();
        assert_eq!(embedder.dimension(), 768);

        let texts = ["hello world", "semantic search"];
        let embeddings = embedder.embed_documents(&texts).await.unwrap();
        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0].len(), 768);

        let norm: f32 = embeddings[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_mock_embedder_deterministic() {
        let embedder = MockEmbedder::new();
        let a = embedder.embed_query("consistent input").await.unwrap();
        let b = embedder.embed_query("consistent input").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_mock_embedder_distinguishes_texts() {
        let embedder = MockEmbedder::with_dimensions(32, 128);
        let a = embedder.embed_query("hello").await.unwrap();
        let b = embedder.embed_query("world").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
