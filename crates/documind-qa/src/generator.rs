//! Sequential QA dataset generation with periodic checkpointing.

use std::path::Path;

use tracing::{debug, info, warn};

use documind_core::{ChatModel, QaPair, Result};
use documind_store::save_qa_pairs;

use crate::chunk::QaChunk;
use crate::extract::parse_qa_response;
use crate::prompts;

/// Outcome counts for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaReport {
    pub generated: usize,
    pub failed: usize,
}

/// Drives chunks through prompt templates and the hosted model.
pub struct QaGenerator<M> {
    model: M,
    checkpoint_interval: usize,
}

impl<M> QaGenerator<M>
where
    M: ChatModel,
{
    pub fn new(model: M, checkpoint_interval: usize) -> Self {
        Self {
            model,
            checkpoint_interval: checkpoint_interval.max(1),
        }
    }

    /// Generate a QA pair per chunk, writing the dataset to `output`.
    ///
    /// Chunks are processed sequentially. A chunk whose response cannot be
    /// parsed is logged and skipped. The accumulated dataset is
    /// checkpointed every `checkpoint_interval` processed chunks and once
    /// more at the end.
    pub async fn generate(&self, chunks: &[QaChunk], output: &Path) -> Result<QaReport> {
        let mut dataset: Vec<QaPair> = Vec::new();
        let mut failed = 0usize;

        info!("Generating QA pairs for {} chunks", chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            // Scoped so the RNG is not held across the model call.
            let template = prompts::random_template(&mut rand::thread_rng());
            let prompt = prompts::render(template, &chunk.source, &chunk.text);

            match self.generate_one(&prompt).await {
                Ok(pair) => dataset.push(pair),
                Err(err) => {
                    failed += 1;
                    warn!("Chunk {}/{} failed: {}", i + 1, chunks.len(), err);
                }
            }

            if (i + 1) % self.checkpoint_interval == 0 {
                save_qa_pairs(output, &dataset)?;
                debug!(
                    "Checkpointed {} pairs after {} chunks",
                    dataset.len(),
                    i + 1
                );
            }
        }

        save_qa_pairs(output, &dataset)?;
        info!(
            "Generated {} QA pairs ({} failed) into {:?}",
            dataset.len(),
            failed,
            output
        );

        Ok(QaReport {
            generated: dataset.len(),
            failed,
        })
    }

    async fn generate_one(&self, prompt: &str) -> Result<QaPair> {
        let response = self.model.complete(prompt).await?;
        parse_qa_response(&response)
    }
}
