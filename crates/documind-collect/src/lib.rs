//! documind-collect - Dataset catalog collection
//!
//! This crate fetches dataset metadata from the Hugging Face catalog API
//! with a single best-effort request and converts the records into corpus
//! documents. No retries, no pagination.

mod huggingface;

pub use huggingface::{documents_from_records, CatalogClient, DatasetRecord};
