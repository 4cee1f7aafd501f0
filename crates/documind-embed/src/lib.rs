//! documind-embed - Pretrained sentence-embedding wrapper
//!
//! This crate wraps a pretrained ONNX sentence-embedding model behind the
//! [`Embedder`] trait: batch tokenization with padding, attention-mask mean
//! pooling, and L2 normalization. The model is symmetric, so document and
//! query embedding share one code path.

mod batch;
mod mock;
mod onnx;

pub use batch::embed_in_batches;
pub use mock::MockEmbedder;
pub use onnx::OnnxEmbedder;

// Re-export the Embedder trait for convenience
pub use documind_core::Embedder;
