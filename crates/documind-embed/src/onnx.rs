//! ONNX-based embedding model implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::ArrayViewD;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use documind_core::{DocumindError, Embedder, EmbeddingConfig, Result};

/// embeddinggemma-300m configuration.
const EMBEDDING_DIM: usize = 768;
const MAX_TOKENS: usize = 2048;

/// ONNX-based sentence embedder.
///
/// The session sits behind a `Mutex` for interior mutability; the demo is
/// sequential, so the lock is never contended.
pub struct OnnxEmbedder {
    session: Mutex<Session>,
    tokenizer: Arc<Tokenizer>,
    dimension: usize,
    max_tokens: usize,
}

impl OnnxEmbedder {
    /// Load model and tokenizer from the embedding configuration.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        info!("Loading ONNX model from {:?}", config.model_path);

        let session = Session::builder()
            .map_err(|e| DocumindError::embedding(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| DocumindError::embedding(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(config.num_threads)
            .map_err(|e| DocumindError::embedding(format!("Failed to set thread count: {}", e)))?
            .commit_from_file(&config.model_path)
            .map_err(|e| DocumindError::embedding(format!("Failed to load model: {}", e)))?;

        info!("Loading tokenizer from {:?}", config.tokenizer_path);

        let tokenizer = Tokenizer::from_file(&config.tokenizer_path)
            .map_err(|e| DocumindError::embedding(format!("Failed to load tokenizer: {}", e)))?;

        info!(
            "Embedder initialized: dim={}, max_tokens={}",
            EMBEDDING_DIM, MAX_TOKENS
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer: Arc::new(tokenizer),
            dimension: EMBEDDING_DIM,
            max_tokens: MAX_TOKENS,
        })
    }

    /// Load an embedder for a model with non-default dimensions.
    pub fn with_dimensions(
        config: &EmbeddingConfig,
        dimension: usize,
        max_tokens: usize,
    ) -> Result<Self> {
        let mut embedder = Self::new(config)?;
        embedder.dimension = dimension;
        embedder.max_tokens = max_tokens;
        Ok(embedder)
    }

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| DocumindError::embedding(format!("Tokenization failed: {}", e)))?;

        // Pad to the longest sequence in the batch, capped at the context.
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(self.max_tokens);

        let batch_size = encodings.len();

        debug!("Embedding batch: size={}, max_len={}", batch_size, max_len);

        let mut input_ids = vec![0i64; batch_size * max_len];
        let mut attention_mask = vec![0i64; batch_size * max_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let len = ids.len().min(max_len);

            for j in 0..len {
                input_ids[i * max_len + j] = ids[j] as i64;
                attention_mask[i * max_len + j] = mask[j] as i64;
            }
        }

        let input_ids_tensor = Tensor::from_array((vec![batch_size, max_len], input_ids))
            .map_err(|e| DocumindError::embedding(format!("Failed to create input tensor: {}", e)))?;

        let attention_mask_tensor = Tensor::from_array((vec![batch_size, max_len], attention_mask))
            .map_err(|e| DocumindError::embedding(format!("Failed to create mask tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| DocumindError::embedding(format!("Failed to lock session: {}", e)))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])
            .map_err(|e| DocumindError::embedding(format!("Inference failed: {}", e)))?;

        // Sentence-embedding exports differ: some emit per-token states that
        // still need pooling, some emit pooled sentence vectors directly.
        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| DocumindError::embedding("No output tensor found"))?;

        let view = output
            .try_extract_array::<f32>()
            .map_err(|e| DocumindError::embedding(format!("Failed to extract tensor: {}", e)))?;

        let shape: Vec<usize> = view.shape().to_vec();
        debug!("Output shape: {:?}", shape);

        let embeddings = if shape.len() == 3 {
            // (batch, seq, hidden): mean pooling over valid tokens
            self.mean_pool(&view, &encodings, max_len)?
        } else if shape.len() == 2 {
            // (batch, hidden): already pooled
            let hidden = shape[1];
            (0..batch_size)
                .map(|i| {
                    let row: Vec<f32> = (0..hidden).map(|j| view[[i, j]]).collect();
                    l2_normalize(row)
                })
                .collect()
        } else {
            return Err(DocumindError::embedding(format!(
                "Unexpected output shape: {:?}",
                shape
            )));
        };

        Ok(embeddings)
    }

    /// Attention-mask mean pooling over a `[batch, seq, hidden]` view.
    fn mean_pool(
        &self,
        tensor: &ArrayViewD<'_, f32>,
        encodings: &[tokenizers::Encoding],
        max_len: usize,
    ) -> Result<Vec<Vec<f32>>> {
        let shape = tensor.shape();
        let seq_len = shape[1];
        let hidden = shape[2];

        let mut embeddings = Vec::with_capacity(encodings.len());

        for (i, encoding) in encodings.iter().enumerate() {
            let mask = encoding.get_attention_mask();
            let valid = mask.iter().take(max_len).filter(|&&m| m == 1).count();

            if valid == 0 {
                embeddings.push(vec![0.0; hidden]);
                continue;
            }

            let mut sum = vec![0.0f32; hidden];
            for j in 0..valid.min(max_len).min(seq_len) {
                if j < mask.len() && mask[j] == 1 {
                    for k in 0..hidden {
                        sum[k] += tensor[[i, j, k]];
                    }
                }
            }

            let mean: Vec<f32> = sum.iter().map(|s| s / valid as f32).collect();
            embeddings.push(l2_normalize(mean));
        }

        Ok(embeddings)
    }
}

/// L2 normalize a vector in place.
pub(crate) fn l2_normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}

#[async_trait]
impl Embedder for OnnxEmbedder {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        // Runs synchronously: the session is not Send and the demo is
        // single-task throughout.
        self.embed_batch(texts)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text])?;
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

    #[test]
    fn test_l2_normalize_unit_norm() {
        let v = l2_normalize(vec![3.0, 4.0]);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let v = l2_normalize(vec![0.0, 0.0, 0.0]);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }
}
