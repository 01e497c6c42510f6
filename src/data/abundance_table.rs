//! Annotated abundance table with sparse storage.

use super::{DenseTable, ObservationMetadata, ObservationTable};
use crate::error::{DysbiosisError, Result};
use sprs::{CsMat, TriMat};
use std::collections::{HashMap, HashSet};

/// A sparse abundance table with per-observation metadata.
///
/// Rows represent observations (taxa/features), columns represent samples.
/// Uses CSR (Compressed Sparse Row) format, so selecting observations is
/// cheap and sample columns are gathered on demand.
#[derive(Debug, Clone)]
pub struct AbundanceTable {
    /// Sparse matrix in CSR format (observations × samples)
    data: CsMat<f64>,
    /// Observation identifiers (row names)
    observation_ids: Vec<String>,
    /// Sample identifiers (column names)
    sample_ids: Vec<String>,
    /// Metadata for each observation, aligned with rows
    metadata: Vec<ObservationMetadata>,
    /// Sample ID -> column index
    sample_index: HashMap<String, usize>,
}

impl AbundanceTable {
    /// Create a new table from a sparse matrix, identifiers and metadata.
    ///
    /// The matrix is converted to CSR if needed. Every stored value must be
    /// finite and non-negative, and observation and sample IDs must be unique.
    pub fn new(
        data: CsMat<f64>,
        observation_ids: Vec<String>,
        sample_ids: Vec<String>,
        metadata: Vec<ObservationMetadata>,
    ) -> Result<Self> {
        let data = if data.is_csr() { data } else { data.to_csr() };
        let (nrows, ncols) = data.shape();
        if nrows != observation_ids.len() {
            return Err(DysbiosisError::DimensionMismatch {
                expected: nrows,
                actual: observation_ids.len(),
            });
        }
        if nrows != metadata.len() {
            return Err(DysbiosisError::DimensionMismatch {
                expected: nrows,
                actual: metadata.len(),
            });
        }
        if ncols != sample_ids.len() {
            return Err(DysbiosisError::DimensionMismatch {
                expected: ncols,
                actual: sample_ids.len(),
            });
        }

        for (row, row_vec) in data.outer_iterator().enumerate() {
            for (col, &value) in row_vec.iter() {
                if !value.is_finite() || value < 0.0 {
                    return Err(DysbiosisError::InvalidAbundance { value, row, col });
                }
            }
        }

        check_unique_observations(&observation_ids)?;
        let sample_index = index_samples(&sample_ids)?;

        Ok(Self {
            data,
            observation_ids,
            sample_ids,
            metadata,
            sample_index,
        })
    }

    /// Build a table from `(row, col, value)` triplets. Duplicate positions
    /// are summed.
    pub fn from_triplets(
        triplets: &[(usize, usize, f64)],
        observation_ids: Vec<String>,
        sample_ids: Vec<String>,
        metadata: Vec<ObservationMetadata>,
    ) -> Result<Self> {
        let shape = (observation_ids.len(), sample_ids.len());
        let mut tri_mat = TriMat::new(shape);
        for &(row, col, value) in triplets {
            if row >= shape.0 || col >= shape.1 {
                return Err(DysbiosisError::InvalidParameter(format!(
                    "Triplet ({}, {}) out of bounds for {}x{} table",
                    row, col, shape.0, shape.1
                )));
            }
            tri_mat.add_triplet(row, col, value);
        }
        Self::new(tri_mat.to_csr(), observation_ids, sample_ids, metadata)
    }

    /// Get the value at (row, col), returning 0 for missing entries.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data.get(row, col).copied().unwrap_or(0.0)
    }

    /// Total number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.nnz()
    }

    /// Get the underlying sparse matrix.
    #[inline]
    pub fn data(&self) -> &CsMat<f64> {
        &self.data
    }

    /// Column index of a sample.
    #[inline]
    pub fn sample_index(&self, sample_id: &str) -> Option<usize> {
        self.sample_index.get(sample_id).copied()
    }

    /// Subset the table to include only specified observations (by index).
    pub fn subset_observations(&self, indices: &[usize]) -> Result<Self> {
        let n_observations = indices.len();
        let n_samples = self.sample_ids.len();

        let mut tri_mat = TriMat::new((n_observations, n_samples));
        let mut new_ids = Vec::with_capacity(n_observations);
        let mut new_metadata = Vec::with_capacity(n_observations);

        for (new_row, &old_row) in indices.iter().enumerate() {
            if old_row >= self.observation_ids.len() {
                return Err(DysbiosisError::InvalidParameter(format!(
                    "Observation index {} out of bounds",
                    old_row
                )));
            }
            new_ids.push(self.observation_ids[old_row].clone());
            new_metadata.push(self.metadata[old_row].clone());

            if let Some(row_vec) = self.data.outer_view(old_row) {
                for (col, &val) in row_vec.iter() {
                    tri_mat.add_triplet(new_row, col, val);
                }
            }
        }

        Ok(Self {
            data: tri_mat.to_csr(),
            observation_ids: new_ids,
            sample_ids: self.sample_ids.clone(),
            metadata: new_metadata,
            sample_index: self.sample_index.clone(),
        })
    }

    /// Convert to a dense table.
    pub fn to_dense(&self) -> DenseTable {
        let mut dense =
            nalgebra::DMatrix::zeros(self.observation_ids.len(), self.sample_ids.len());
        for (row, row_vec) in self.data.outer_iterator().enumerate() {
            for (col, &val) in row_vec.iter() {
                dense[(row, col)] += val;
            }
        }
        DenseTable::from_parts(
            dense,
            self.observation_ids.clone(),
            self.sample_ids.clone(),
            self.metadata.clone(),
            self.sample_index.clone(),
        )
    }
}

impl ObservationTable for AbundanceTable {
    fn observation_ids(&self) -> &[String] {
        &self.observation_ids
    }

    fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    fn observation_metadata(&self) -> &[ObservationMetadata] {
        &self.metadata
    }

    fn filter_observations<F>(&self, mut predicate: F) -> Result<Self>
    where
        F: FnMut(&str, &ObservationMetadata) -> bool,
    {
        let keep: Vec<usize> = (0..self.observation_ids.len())
            .filter(|&row| predicate(&self.observation_ids[row], &self.metadata[row]))
            .collect();
        self.subset_observations(&keep)
    }

    fn sample_values(&self, sample_id: &str) -> Option<Vec<f64>> {
        let col = self.sample_index(sample_id)?;
        Some(
            self.data
                .outer_iterator()
                .filter_map(|row_vec| row_vec.get(col).copied())
                .collect(),
        )
    }
}

/// Reject repeated observation IDs.
pub(crate) fn check_unique_observations(observation_ids: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(observation_ids.len());
    for id in observation_ids {
        if !seen.insert(id.as_str()) {
            return Err(DysbiosisError::DuplicateObservation(id.clone()));
        }
    }
    Ok(())
}

/// Build a sample ID -> column index map, rejecting duplicates.
pub(crate) fn index_samples(sample_ids: &[String]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(sample_ids.len());
    for (col, id) in sample_ids.iter().enumerate() {
        if index.insert(id.clone(), col).is_some() {
            return Err(DysbiosisError::DuplicateSample(id.clone()));
        }
    }
    Ok(index)
}
