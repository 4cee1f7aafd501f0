//! Core domain types for the documind demo.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata attached to a document at collection time.
///
/// The named fields are the ones the front ends render; anything else the
/// upstream API provided is preserved in the flattened `extra` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Human-readable topic, usually the dataset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Section within the source, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Canonical URL of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Whitespace word count of the document text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,

    /// Any additional fields carried through from collection.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A document in the corpus. Immutable once collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the upstream source.
    pub id: String,

    /// Document text, the unit of embedding.
    pub text: String,

    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document, filling in the word count.
    pub fn new(id: impl Into<String>, text: impl Into<String>, mut metadata: DocumentMetadata) -> Self {
        let text = text.into();
        metadata.word_count = Some(text.split_whitespace().count() as u64);
        Self {
            id: id.into(),
            text,
            metadata,
        }
    }

    /// Topic for display, falling back to the document id.
    pub fn display_topic(&self) -> &str {
        self.metadata.topic.as_deref().unwrap_or(&self.id)
    }
}

/// A generated question-answer pair.
///
/// The only link back to the originating document is the citation string
/// embedded in `context` and `answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub context: String,
    pub answer: String,
}

/// A single ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result rank (1-indexed).
    pub rank: u32,

    /// Bounded similarity, `1 / (1 + distance)`.
    pub score: f32,

    /// Euclidean distance between query and document embeddings.
    pub distance: f32,

    /// The matched document.
    pub document: Document,
}

/// Search results container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// The original query.
    pub query: String,

    /// Total hits returned.
    pub total: usize,

    /// Query latency in milliseconds.
    pub latency_ms: u64,

    /// Individual hits, ordered by increasing distance.
    pub hits: Vec<SearchHit>,
}

/// Corpus statistics reported by the front ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of documents (equals number of embedding rows).
    pub documents: usize,

    /// Embedding dimension.
    pub dimension: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_word_count() {
        let doc = Document::new("d1", "three word text", DocumentMetadata::default());
        assert_eq!(doc.metadata.word_count, Some(3));
    }

    #[test]
    fn test_display_topic_fallback() {
        let doc = Document::new("org/squad", "q&a corpus", DocumentMetadata::default());
        assert_eq!(doc.display_topic(), "org/squad");

        let meta = DocumentMetadata {
            topic: Some("squad".to_string()),
            ..Default::default()
        };
        let doc = Document::new("org/squad", "q&a corpus", meta);
        assert_eq!(doc.display_topic(), "squad");
    }

    #[test]
    fn test_metadata_extra_roundtrip() {
        let json = r#"{"id":"d1","text":"hello","metadata":{"topic":"t","downloads":42}}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.metadata.topic.as_deref(), Some("t"));
        assert_eq!(doc.metadata.extra.get("downloads").and_then(|v| v.as_u64()), Some(42));

        let back = serde_json::to_string(&doc).unwrap();
        let again: Document = serde_json::from_str(&back).unwrap();
        assert_eq!(doc, again);
    }
}
