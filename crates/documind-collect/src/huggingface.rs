//! Hugging Face dataset catalog client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use documind_core::{CollectorConfig, Document, DocumentMetadata, DocumindError, Result};

/// One dataset record as returned by the catalog API.
///
/// The API has used both `id` and `_id` across versions; either is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "_id")]
    pub legacy_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub downloads: u64,

    #[serde(default)]
    pub likes: u64,
}

impl DatasetRecord {
    /// Identifier, preferring the modern field.
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.legacy_id.as_deref())
    }
}

/// The catalog endpoint answers with either a bare array or a wrapper object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    List(Vec<DatasetRecord>),
    Page { datasets: Vec<DatasetRecord> },
}

/// Client for the public dataset catalog.
pub struct CatalogClient {
    client: Client,
    api_url: String,
    limit: Option<usize>,
}

impl CatalogClient {
    /// Build a client from the collector configuration.
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocumindError::collect(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            limit: config.limit,
        })
    }

    /// Fetch the dataset catalog with a single request.
    pub async fn fetch_catalog(&self) -> Result<Vec<DatasetRecord>> {
        info!("Fetching dataset catalog from {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| DocumindError::collect(format!("catalog request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DocumindError::collect(format!(
                "catalog returned {}",
                response.status()
            )));
        }

        let parsed: CatalogResponse = response
            .json()
            .await
            .map_err(|e| DocumindError::collect(format!("failed to parse catalog response: {}", e)))?;

        let mut records = match parsed {
            CatalogResponse::List(records) => records,
            CatalogResponse::Page { datasets } => datasets,
        };
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }

        info!("Fetched {} dataset records", records.len());
        Ok(records)
    }

    /// Fetch the catalog and convert it into corpus documents.
    pub async fn collect_documents(&self) -> Result<Vec<Document>> {
        let records = self.fetch_catalog().await?;
        Ok(documents_from_records(records))
    }
}

/// Convert catalog records into documents, skipping unusable ones.
pub fn documents_from_records(records: Vec<DatasetRecord>) -> Vec<Document> {
    let mut documents = Vec::with_capacity(records.len());
    for record in records {
        match document_from_record(record) {
            Some(doc) => documents.push(doc),
            None => warn!("Skipping catalog record without id"),
        }
    }
    documents
}

fn document_from_record(record: DatasetRecord) -> Option<Document> {
    let id = record.record_id()?.to_string();
    let name = id.rsplit('/').next().unwrap_or(&id).to_string();

    // Description is the document text; datasets without one fall back to
    // their name so the corpus stays positionally complete.
    let text = record
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| name.clone());

    let mut extra = HashMap::new();
    extra.insert("tags".to_string(), json!(record.tags));
    extra.insert("downloads".to_string(), json!(record.downloads));
    extra.insert("likes".to_string(), json!(record.likes));

    let metadata = DocumentMetadata {
        topic: Some(name),
        section: None,
        source_url: Some(format!("https://huggingface.co/datasets/{}", id)),
        word_count: None,
        extra,
    };

    Some(Document::new(id, text, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let body = r#"[
            {"id": "org/squad", "description": "Reading comprehension", "downloads": 12, "likes": 3},
            {"_id": "abc123", "description": "Legacy record"}
        ]"#;
        let parsed: CatalogResponse = serde_json::from_str(body).unwrap();
        let records = match parsed {
            CatalogResponse::List(records) => records,
            _ => panic!("expected bare array"),
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_id(), Some("org/squad"));
        assert_eq!(records[1].record_id(), Some("abc123"));
    }

    #[test]
    fn test_parse_wrapped_object() {
        let body = r#"{"datasets": [{"id": "org/glue", "tags": ["nlp"]}]}"#;
        let parsed: CatalogResponse = serde_json::from_str(body).unwrap();
        let records = match parsed {
            CatalogResponse::Page { datasets } => datasets,
            _ => panic!("expected wrapper object"),
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tags, vec!["nlp"]);
    }

    #[test]
    fn test_document_from_record_mapping() {
        let record = DatasetRecord {
            id: Some("org/squad".to_string()),
            description: Some("Reading comprehension benchmark".to_string()),
            downloads: 42,
            likes: 7,
            ..Default::default()
        };
        let docs = documents_from_records(vec![record]);
        assert_eq!(docs.len(), 1);

        let doc = &docs[0];
        assert_eq!(doc.id, "org/squad");
        assert_eq!(doc.text, "Reading comprehension benchmark");
        assert_eq!(doc.metadata.topic.as_deref(), Some("squad"));
        assert_eq!(
            doc.metadata.source_url.as_deref(),
            Some("https://huggingface.co/datasets/org/squad")
        );
        assert_eq!(doc.metadata.word_count, Some(3));
        assert_eq!(
            doc.metadata.extra.get("downloads").and_then(|v| v.as_u64()),
            Some(42)
        );
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let records = vec![
            DatasetRecord {
                description: Some("no id at all".to_string()),
                ..Default::default()
            },
            DatasetRecord {
                id: Some("org/kept".to_string()),
                ..Default::default()
            },
        ];
        let docs = documents_from_records(records);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "org/kept");
    }

    #[test]
    fn test_description_fallback_uses_name() {
        let record = DatasetRecord {
            id: Some("org/empty-desc".to_string()),
            description: Some("   ".to_string()),
            ..Default::default()
        };
        let docs = documents_from_records(vec![record]);
        assert_eq!(docs[0].text, "empty-desc");
    }
}
