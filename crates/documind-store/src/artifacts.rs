//! Flat-file persistence for documents, embeddings, and QA datasets.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use documind_core::{Document, DocumindError, QaPair, Result};

/// A dense row-major embedding matrix, one fixed-width row per document.
///
/// On disk: a `[u64 rows][u64 dim]` little-endian header followed by
/// `rows * dim` little-endian `f32` values.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Create an empty matrix with the given row width.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(DocumindError::invalid_argument(
                "embedding dimension must be non-zero",
            ));
        }
        Ok(Self {
            dim,
            data: Vec::new(),
        })
    }

    /// Build a matrix from vectors, all of which must share one width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows
            .first()
            .map(|r| r.len())
            .ok_or_else(|| DocumindError::invalid_argument("cannot build matrix from no rows"))?;
        let mut matrix = Self::new(dim)?;
        for row in &rows {
            matrix.push(row)?;
        }
        Ok(matrix)
    }

    /// Append a row.
    pub fn push(&mut self, row: &[f32]) -> Result<()> {
        if row.len() != self.dim {
            return Err(DocumindError::DimensionMismatch {
                expected: self.dim,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Row width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Borrow row `i`. Panics if out of range, as slice indexing does.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Write the matrix to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(&(self.rows() as u64).to_le_bytes())?;
        writer.write_all(&(self.dim as u64).to_le_bytes())?;
        for value in &self.data {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.flush()?;

        debug!("Saved {}x{} matrix to {:?}", self.rows(), self.dim, path);
        Ok(())
    }

    /// Read a matrix from `path`, validating the payload against the header.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header = [0u8; 8];
        reader.read_exact(&mut header).map_err(|_| {
            DocumindError::corrupt(path.display().to_string(), "missing row-count header")
        })?;
        let rows = u64::from_le_bytes(header) as usize;
        reader.read_exact(&mut header).map_err(|_| {
            DocumindError::corrupt(path.display().to_string(), "missing dimension header")
        })?;
        let dim = u64::from_le_bytes(header) as usize;

        if dim == 0 {
            return Err(DocumindError::corrupt(
                path.display().to_string(),
                "zero embedding dimension",
            ));
        }

        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        let expected = rows * dim * std::mem::size_of::<f32>();
        if payload.len() != expected {
            return Err(DocumindError::corrupt(
                path.display().to_string(),
                format!("expected {} payload bytes, found {}", expected, payload.len()),
            ));
        }

        let data = payload
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        debug!("Loaded {}x{} matrix from {:?}", rows, dim, path);
        Ok(Self { dim, data })
    }
}

/// The embedding matrix together with its document sidecar.
///
/// Positional correspondence is the only linkage between the two; `load`
/// rejects artifacts whose counts disagree.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub documents: Vec<Document>,
    pub embeddings: EmbeddingMatrix,
}

impl Artifacts {
    /// Bundle documents and embeddings, checking the counts match.
    pub fn new(documents: Vec<Document>, embeddings: EmbeddingMatrix) -> Result<Self> {
        if documents.len() != embeddings.rows() {
            return Err(DocumindError::CountMismatch {
                documents: documents.len(),
                embeddings: embeddings.rows(),
            });
        }
        Ok(Self {
            documents,
            embeddings,
        })
    }

    /// Persist matrix and sidecar, in the shared document order.
    pub fn save(&self, embeddings_path: &Path, sidecar_path: &Path) -> Result<()> {
        self.embeddings.save(embeddings_path)?;
        save_documents(sidecar_path, &self.documents)?;
        info!(
            "Saved {} documents with {}-dim embeddings",
            self.documents.len(),
            self.embeddings.dim()
        );
        Ok(())
    }

    /// Load matrix and sidecar, enforcing positional correspondence.
    pub fn load(embeddings_path: &Path, sidecar_path: &Path) -> Result<Self> {
        let embeddings = EmbeddingMatrix::load(embeddings_path)?;
        let documents = load_documents(sidecar_path)?;
        Self::new(documents, embeddings)
    }
}

/// Write a document list as a pretty-printed JSON array.
pub fn save_documents(path: &Path, documents: &[Document]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, documents)?;
    writer.flush()?;
    Ok(())
}

/// Read a document list from a JSON array.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let documents = serde_json::from_reader(reader)?;
    Ok(documents)
}

/// Write a QA dataset. Also used for mid-run checkpoints.
pub fn save_qa_pairs(path: &Path, pairs: &[QaPair]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, pairs)?;
    writer.flush()?;
    Ok(())
}

/// Read a QA dataset.
pub fn load_qa_pairs(path: &Path) -> Result<Vec<QaPair>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let pairs = serde_json::from_reader(reader)?;
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use documind_core::DocumentMetadata;

    fn mk_doc(id: &str, text: &str) -> Document {
        Document::new(id, text, DocumentMetadata::default())
    }

    #[test]
    fn test_matrix_push_checks_dimension() {
        let mut matrix = EmbeddingMatrix::new(3).unwrap();
        matrix.push(&[1.0, 2.0, 3.0]).unwrap();
        let err = matrix.push(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, DocumindError::DimensionMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_matrix_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embeddings.bin");

        let matrix =
            EmbeddingMatrix::from_rows(vec![vec![0.5, -1.25], vec![3.0, 4.0], vec![0.0, 1.0]])
                .unwrap();
        matrix.save(&path).unwrap();

        let loaded = EmbeddingMatrix::load(&path).unwrap();
        assert_eq!(loaded, matrix);
        assert_eq!(loaded.rows(), 3);
        assert_eq!(loaded.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_matrix_load_rejects_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embeddings.bin");

        let matrix = EmbeddingMatrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        matrix.save(&path).unwrap();

        // Drop the last four bytes of payload.
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();

        let err = EmbeddingMatrix::load(&path).unwrap_err();
        assert!(matches!(err, DocumindError::CorruptArtifact { .. }));
    }

    #[test]
    fn test_artifacts_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let emb_path = dir.path().join("embeddings.bin");
        let sidecar = dir.path().join("documents_with_embeddings.json");

        let documents = vec![mk_doc("a", "first"), mk_doc("b", "second"), mk_doc("c", "third")];
        let embeddings = EmbeddingMatrix::from_rows(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
        ])
        .unwrap();

        let artifacts = Artifacts::new(documents.clone(), embeddings.clone()).unwrap();
        artifacts.save(&emb_path, &sidecar).unwrap();

        let loaded = Artifacts::load(&emb_path, &sidecar).unwrap();
        assert_eq!(loaded.documents, documents);
        for i in 0..documents.len() {
            assert_eq!(loaded.embeddings.row(i), embeddings.row(i));
        }
    }

    #[test]
    fn test_artifacts_rejects_count_mismatch() {
        let documents = vec![mk_doc("a", "first")];
        let embeddings =
            EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();

        let err = Artifacts::new(documents, embeddings).unwrap_err();
        assert!(matches!(
            err,
            DocumindError::CountMismatch { documents: 1, embeddings: 2 }
        ));
    }

    #[test]
    fn test_qa_pairs_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa_dataset.json");

        let pairs = vec![QaPair {
            question: "What is a flat index?".to_string(),
            context: "[squad] An exhaustive nearest-neighbor search".to_string(),
            answer: "An exact scan over every vector. Source: squad".to_string(),
        }];
        save_qa_pairs(&path, &pairs).unwrap();
        assert_eq!(load_qa_pairs(&path).unwrap(), pairs);
    }
}
