//! documind CLI - pipeline driver for the semantic search demo.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use documind_collect::CatalogClient;
use documind_core::{DocumindConfig, DocumindError, Result};
use documind_embed::{embed_in_batches, OnnxEmbedder};
use documind_index::Retriever;
use documind_qa::{chunk_corpus, AnthropicClient, QaGenerator};
use documind_store::{load_documents, save_documents, Artifacts, EmbeddingMatrix};

/// documind - retrieval-augmented semantic document search
#[derive(Parser)]
#[command(name = "documind")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/documind/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect dataset metadata into a documents file
    Collect {
        /// Output path (default: documents.json in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep at most this many records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Embed collected documents and persist the search artifacts
    Embed {
        /// Documents file (default: documents.json in the data directory)
        #[arg(short, long)]
        documents: Option<PathBuf>,
    },

    /// Search the embedded corpus
    Search {
        /// Search query
        query: String,

        /// Number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Generate a synthetic QA dataset from the documents
    Generate {
        /// Documents file (default: documents.json in the data directory)
        #[arg(short, long)]
        documents: Option<PathBuf>,

        /// Output path (default: qa_dataset.json in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show corpus statistics
    Stats,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<PathBuf>) -> Result<DocumindConfig> {
    match path {
        Some(path) => DocumindConfig::load(&path),
        None => DocumindConfig::load_default(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Collect { output, limit } => collect(&config, output, limit).await,
        Commands::Embed { documents } => embed(&config, documents).await,
        Commands::Search { query, top_k } => search(&config, &query, top_k).await,
        Commands::Generate { documents, output } => generate(&config, documents, output).await,
        Commands::Stats => stats(&config),
    };

    if let Err(err) = outcome {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn collect(
    config: &DocumindConfig,
    output: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let mut collector_config = config.collector.clone();
    if limit.is_some() {
        collector_config.limit = limit;
    }

    let client = CatalogClient::new(&collector_config)?;
    let documents = client.collect_documents().await?;

    let output = output.unwrap_or_else(|| config.data.documents_path());
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    save_documents(&output, &documents)?;

    println!("Collected {} documents into {}", documents.len(), output.display());
    Ok(())
}

async fn embed(config: &DocumindConfig, documents_path: Option<PathBuf>) -> Result<()> {
    let documents_path = documents_path.unwrap_or_else(|| config.data.documents_path());
    let documents = load_documents(&documents_path)?;
    if documents.is_empty() {
        return Err(DocumindError::invalid_argument(format!(
            "no documents to embed in {}",
            documents_path.display()
        )));
    }

    println!("Embedding {} documents...", documents.len());

    let embedder = OnnxEmbedder::new(&config.embedding)?;
    let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
    let vectors = embed_in_batches(&embedder, &texts, config.embedding.batch_size).await?;
    let matrix = EmbeddingMatrix::from_rows(vectors)?;

    let artifacts = Artifacts::new(documents, matrix)?;
    fs::create_dir_all(&config.data.dir)?;
    artifacts.save(&config.data.embeddings_path(), &config.data.sidecar_path())?;

    println!(
        "Saved {} embeddings ({} dims) to {}",
        artifacts.documents.len(),
        artifacts.embeddings.dim(),
        config.data.embeddings_path().display()
    );
    Ok(())
}

async fn search(config: &DocumindConfig, query: &str, top_k: Option<usize>) -> Result<()> {
    let artifacts = Artifacts::load(
        &config.data.embeddings_path(),
        &config.data.sidecar_path(),
    )?;
    let embedder = Arc::new(OnnxEmbedder::new(&config.embedding)?);
    let retriever = Retriever::new(artifacts, embedder)?;

    let top_k = top_k
        .unwrap_or(config.search.default_top_k)
        .min(config.search.max_top_k);
    let results = retriever.query(query, top_k).await?;

    println!(
        "Top {} results for {:?} ({}ms)\n",
        results.total, results.query, results.latency_ms
    );
    for hit in &results.hits {
        println!(
            "#{} {} (score {:.3}, distance {:.3})",
            hit.rank,
            hit.document.display_topic(),
            hit.score,
            hit.distance
        );
        println!("   {}", snippet(&hit.document.text, 160));
        if let Some(url) = &hit.document.metadata.source_url {
            println!("   {}", url);
        }
        println!();
    }
    Ok(())
}

async fn generate(
    config: &DocumindConfig,
    documents_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let documents_path = documents_path.unwrap_or_else(|| config.data.documents_path());
    let documents = load_documents(&documents_path)?;
    let chunks = chunk_corpus(&documents, config.qa.max_chunk_words);
    if chunks.is_empty() {
        return Err(DocumindError::invalid_argument(format!(
            "no chunks to process in {}",
            documents_path.display()
        )));
    }

    println!("Generating QA pairs for {} chunks...", chunks.len());

    let client = AnthropicClient::new(&config.qa)?;
    let generator = QaGenerator::new(client, config.qa.checkpoint_interval);

    let output = output.unwrap_or_else(|| config.data.qa_dataset_path());
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let report = generator.generate(&chunks, &output).await?;

    println!(
        "Generated {} QA pairs ({} failed) into {}",
        report.generated,
        report.failed,
        output.display()
    );
    Ok(())
}

fn stats(config: &DocumindConfig) -> Result<()> {
    let artifacts = Artifacts::load(
        &config.data.embeddings_path(),
        &config.data.sidecar_path(),
    )?;

    println!("Documents:           {}", artifacts.documents.len());
    println!("Embedding dimension: {}", artifacts.embeddings.dim());
    println!("Data directory:      {}", config.data.dir.display());
    Ok(())
}

fn snippet(text: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(max_chars + 3);
    for (count, ch) in text.chars().enumerate() {
        if count >= max_chars {
            out.push_str("...");
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates_long_text() {
        let long = "x".repeat(500);
        let short = snippet(&long, 160);
        assert_eq!(short.chars().count(), 163);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_snippet_flattens_newlines() {
        assert_eq!(snippet("a\nb", 10), "a b");
    }
}
