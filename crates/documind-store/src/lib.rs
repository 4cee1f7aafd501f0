//! documind-store - Flat-file artifact persistence
//!
//! This crate persists the corpus artifacts: the collected document list,
//! the embedding matrix with its document sidecar, and the generated QA
//! dataset. Documents and embedding rows are linked by position only; the
//! [`Artifacts`] bundle checks that invariant on load.

mod artifacts;

pub use artifacts::{
    load_documents, load_qa_pairs, save_documents, save_qa_pairs, Artifacts, EmbeddingMatrix,
};
