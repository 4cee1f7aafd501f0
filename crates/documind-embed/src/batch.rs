//! Batched corpus embedding.

use tracing::info;

use documind_core::{Embedder, Result};

/// Embed a text list in fixed-size batches, preserving input order.
///
/// Order preservation is what keeps the embedding rows positionally
/// aligned with the document list downstream.
pub async fn embed_in_batches<E: Embedder>(
    embedder: &E,
    texts: &[&str],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    let batch_size = batch_size.max(1);
    let mut embeddings = Vec::with_capacity(texts.len());

    for (i, batch) in texts.chunks(batch_size).enumerate() {
        let vectors = embedder.embed_documents(batch).await?;
        embeddings.extend(vectors);
        info!(
            "Embedded batch {} ({}/{} texts)",
            i + 1,
            embeddings.len(),
            texts.len()
        );
    }

    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockEmbedder;

    #[tokio::test]
    async fn test_batching_preserves_order() {
        let embedder = MockEmbedder::with_dimensions(16, 64);
        let texts = ["one", "two", "three", "four", "five"];

        let batched = embed_in_batches(&embedder, &texts, 2).await.unwrap();
        let whole = embedder.embed_documents(&texts).await.unwrap();

        assert_eq!(batched, whole);
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_clamped() {
        let embedder = MockEmbedder::with_dimensions(8, 64);
        let texts = ["a", "b"];
        let embeddings = embed_in_batches(&embedder, &texts, 0).await.unwrap();
        assert_eq!(embeddings.len(), 2);
    }
}
