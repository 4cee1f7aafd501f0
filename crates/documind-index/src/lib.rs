//! documind-index - Exact nearest-neighbor search
//!
//! This crate provides the flat L2 index (an exhaustive Euclidean scan
//! over every stored vector) and the retriever that embeds a query,
//! searches the index, and maps distances to bounded similarity scores.

mod flat;
mod retriever;

pub use flat::{FlatL2Index, Neighbor};
pub use retriever::{similarity, Retriever};

// Re-export for convenience
pub use documind_core::{SearchHit, SearchResults};
