//! Retriever: query embedding plus flat-index search over the corpus.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use documind_core::{
    CorpusStats, Document, DocumindError, Embedder, Result, SearchHit, SearchResults,
};
use documind_store::Artifacts;

use crate::flat::FlatL2Index;

/// Bounded similarity derived from Euclidean distance, `1 / (1 + d)`.
///
/// Monotonically decreasing in distance; 1.0 at distance zero.
pub fn similarity(distance: f32) -> f32 {
    1.0 / (1.0 + distance)
}

/// Embeds queries and searches the corpus index.
///
/// Owns the document list and the index built from its embeddings; the
/// two stay positionally aligned because [`Artifacts`] checked the counts
/// and the index preserves row order.
#[derive(Debug)]
pub struct Retriever<E> {
    documents: Vec<Document>,
    index: FlatL2Index,
    embedder: Arc<E>,
}

impl<E> Retriever<E>
where
    E: Embedder,
{
    /// Build a retriever from loaded artifacts and the embedding model.
    pub fn new(artifacts: Artifacts, embedder: Arc<E>) -> Result<Self> {
        if artifacts.embeddings.dim() != embedder.dimension() {
            return Err(DocumindError::DimensionMismatch {
                expected: embedder.dimension(),
                actual: artifacts.embeddings.dim(),
            });
        }

        let index = FlatL2Index::from_matrix(&artifacts.embeddings)?;
        info!(
            "Retriever ready: {} documents, dim={}",
            artifacts.documents.len(),
            index.dim()
        );

        Ok(Self {
            documents: artifacts.documents,
            index,
            embedder,
        })
    }

    /// Corpus statistics for the front ends.
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents: self.documents.len(),
            dimension: self.index.dim(),
        }
    }

    /// Return the `top_k` nearest documents for a query string.
    pub async fn query(&self, text: &str, top_k: usize) -> Result<SearchResults> {
        let start = Instant::now();

        info!("Searching for: {:?}", text);

        let embedding = self.embedder.embed_query(text).await?;
        let neighbors = self.index.search(&embedding, top_k)?;

        debug!("Index returned {} neighbors", neighbors.len());

        let hits = neighbors
            .iter()
            .enumerate()
            .map(|(i, neighbor)| SearchHit {
                rank: i as u32 + 1,
                score: similarity(neighbor.distance),
                distance: neighbor.distance,
                document: self.documents[neighbor.row].clone(),
            })
            .collect::<Vec<_>>();

        let latency_ms = start.elapsed().as_millis() as u64;

        info!("Search completed in {}ms, {} hits", latency_ms, hits.len());

        Ok(SearchResults {
            query: text.to_string(),
            total: hits.len(),
            latency_ms,
            hits,
        })
    }
}
