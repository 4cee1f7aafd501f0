//! Flat L2 index: exhaustive Euclidean nearest-neighbor search.

use documind_core::{DocumindError, Result};
use documind_store::EmbeddingMatrix;

/// A nearest-neighbor candidate: matrix row and Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f32,
}

/// An exact nearest-neighbor index over fixed-width vectors.
///
/// Every query compares against every stored vector; there is no
/// approximation, eviction, or incremental maintenance. Rebuilding from
/// the embedding matrix is the only update path.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dim: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    /// Create an empty index for vectors of the given width.
    pub fn with_dim(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(DocumindError::invalid_argument(
                "index dimension must be non-zero",
            ));
        }
        Ok(Self {
            dim,
            data: Vec::new(),
        })
    }

    /// Build an index holding every row of the matrix, in row order.
    pub fn from_matrix(matrix: &EmbeddingMatrix) -> Result<Self> {
        let mut index = Self::with_dim(matrix.dim())?;
        for i in 0..matrix.rows() {
            index.add(matrix.row(i))?;
        }
        Ok(index)
    }

    /// Add a vector.
    pub fn add(&mut self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(DocumindError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        self.data.extend_from_slice(vector);
        Ok(())
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return up to `k` nearest vectors by increasing Euclidean distance.
    ///
    /// Ties land in arbitrary order. `k = 0` is an invalid argument; `k`
    /// beyond the stored count returns everything.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 {
            return Err(DocumindError::invalid_argument(
                "result count must be at least 1",
            ));
        }
        if query.len() != self.dim {
            return Err(DocumindError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = (0..self.len())
            .map(|row| {
                let stored = &self.data[row * self.dim..(row + 1) * self.dim];
                let squared: f32 = stored
                    .iter()
                    .zip(query.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                Neighbor {
                    row,
                    distance: squared.sqrt(),
                }
            })
            .collect();

        neighbors.sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);
        Ok(neighbors)
    }
}
