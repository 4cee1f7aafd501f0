//! Word-window chunking of documents for QA generation.

use documind_core::Document;

/// A chunk of document text paired with its source label.
#[derive(Debug, Clone, PartialEq)]
pub struct QaChunk {
    pub text: String,
    pub source: String,
}

/// Split one document into word windows of at most `max_words` words.
///
/// The source label is the document topic (falling back to its id) so the
/// generated citations stay human-readable. Documents shorter than the
/// window yield a single chunk; empty documents yield none.
pub fn chunk_document(document: &Document, max_words: usize) -> Vec<QaChunk> {
    let max_words = max_words.max(1);
    let words: Vec<&str> = document.text.split_whitespace().collect();
    let source = document.display_topic().to_string();

    words
        .chunks(max_words)
        .map(|window| QaChunk {
            text: window.join(" "),
            source: source.clone(),
        })
        .collect()
}

/// Chunk every document in the corpus, in document order.
pub fn chunk_corpus(documents: &[Document], max_words: usize) -> Vec<QaChunk> {
    documents
        .iter()
        .flat_map(|doc| chunk_document(doc, max_words))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use documind_core::DocumentMetadata;

    fn mk_doc(id: &str, text: &str) -> Document {
        Document::new(id, text, DocumentMetadata::default())
    }

    #[test]
    fn test_short_document_is_one_chunk() {
        let doc = mk_doc("d1", "a short document");
        let chunks = chunk_document(&doc, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "a short document");
        assert_eq!(chunks[0].source, "d1");
    }

    #[test]
    fn test_long_document_is_windowed() {
        let doc = mk_doc("d1", "one two three four five six seven");
        let chunks = chunk_document(&doc, 3);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "one two three");
        assert_eq!(chunks[1].text, "four five six");
        assert_eq!(chunks[2].text, "seven");
    }

    #[test]
    fn test_empty_document_yields_no_chunks() {
        let doc = mk_doc("d1", "   ");
        assert!(chunk_document(&doc, 10).is_empty());
    }

    #[test]
    fn test_source_prefers_topic() {
        let meta = DocumentMetadata {
            topic: Some("squad".to_string()),
            ..Default::default()
        };
        let doc = Document::new("org/squad", "reading comprehension", meta);
        let chunks = chunk_document(&doc, 10);
        assert_eq!(chunks[0].source, "squad");
    }

    #[test]
    fn test_chunk_corpus_keeps_document_order() {
        let docs = vec![mk_doc("a", "first doc"), mk_doc("b", "second doc")];
        let chunks = chunk_corpus(&docs, 10);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].source, "a");
        assert_eq!(chunks[1].source, "b");
    }
}
