//! Annotated abundance table with dense storage.

use super::abundance_table::{check_unique_observations, index_samples};
use super::{AbundanceTable, ObservationMetadata, ObservationTable};
use crate::error::{DysbiosisError, Result};
use nalgebra::DMatrix;
use std::collections::HashMap;

/// A dense abundance table (observations × samples) backed by a
/// column-major [`DMatrix`], so a sample's values are contiguous.
#[derive(Debug, Clone)]
pub struct DenseTable {
    data: DMatrix<f64>,
    observation_ids: Vec<String>,
    sample_ids: Vec<String>,
    metadata: Vec<ObservationMetadata>,
    sample_index: HashMap<String, usize>,
}

impl DenseTable {
    /// Create a new dense table.
    pub fn new(
        data: DMatrix<f64>,
        observation_ids: Vec<String>,
        sample_ids: Vec<String>,
        metadata: Vec<ObservationMetadata>,
    ) -> Result<Self> {
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
        for row in 0..nrows {
            for col in 0..ncols {
                let value = data[(row, col)];
                if !value.is_finite() || value < 0.0 {
                    return Err(DysbiosisError::InvalidAbundance { value, row, col });
                }
            }
        }

        check_unique_observations(&observation_ids)?;
        let sample_index = index_samples(&sample_ids)?;
        Ok(Self::from_parts(
            data,
            observation_ids,
            sample_ids,
            metadata,
            sample_index,
        ))
    }

    /// Assemble from already-validated parts.
    pub(crate) fn from_parts(
        data: DMatrix<f64>,
        observation_ids: Vec<String>,
        sample_ids: Vec<String>,
        metadata: Vec<ObservationMetadata>,
        sample_index: HashMap<String, usize>,
    ) -> Self {
        Self {
            data,
            observation_ids,
            sample_ids,
            metadata,
            sample_index,
        }
    }

    /// Get the underlying dense matrix.
    #[inline]
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Convert to a sparse table, dropping zero entries.
    pub fn to_sparse(&self) -> Result<AbundanceTable> {
        let mut triplets = Vec::new();
        for row in 0..self.data.nrows() {
            for col in 0..self.data.ncols() {
                let val = self.data[(row, col)];
                if val > 0.0 {
                    triplets.push((row, col, val));
                }
            }
        }
        AbundanceTable::from_triplets(
            &triplets,
            self.observation_ids.clone(),
            self.sample_ids.clone(),
            self.metadata.clone(),
        )
    }
}

impl ObservationTable for DenseTable {
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

        Ok(Self {
            data: self.data.select_rows(keep.iter()),
            observation_ids: keep.iter().map(|&row| self.observation_ids[row].clone()).collect(),
            sample_ids: self.sample_ids.clone(),
            metadata: keep.iter().map(|&row| self.metadata[row].clone()).collect(),
            sample_index: self.sample_index.clone(),
        })
    }

    fn sample_values(&self, sample_id: &str) -> Option<Vec<f64>> {
        let col = *self.sample_index.get(sample_id)?;
        Some(self.data.column(col).iter().copied().collect())
    }
}
