//! The abundance-table contract read by the index computation.

use super::ObservationMetadata;
use crate::error::Result;

/// A table of non-negative abundances with observations as rows and samples
/// as columns, where every observation carries [`ObservationMetadata`].
///
/// Implementations may store values densely or sparsely. Filtering removes
/// rows only; the sample axis of a derived table always equals the sample
/// axis of its source.
pub trait ObservationTable: Sized {
    /// Observation identifiers (row names).
    fn observation_ids(&self) -> &[String];

    /// Sample identifiers (column names).
    fn sample_ids(&self) -> &[String];

    /// Per-observation metadata, aligned with [`observation_ids`](Self::observation_ids).
    fn observation_metadata(&self) -> &[ObservationMetadata];

    /// Build a new table keeping only the observations for which `predicate`
    /// returns true. The predicate receives the observation id and metadata.
    fn filter_observations<F>(&self, predicate: F) -> Result<Self>
    where
        F: FnMut(&str, &ObservationMetadata) -> bool;

    /// Values of one sample across all observations, or `None` if the sample
    /// does not exist. Sparse implementations may omit zeros.
    fn sample_values(&self, sample_id: &str) -> Option<Vec<f64>>;

    /// Number of observations (rows).
    fn n_observations(&self) -> usize {
        self.observation_ids().len()
    }

    /// Number of samples (columns).
    fn n_samples(&self) -> usize {
        self.sample_ids().len()
    }

    /// A table is empty when either axis has zero length.
    fn is_empty(&self) -> bool {
        self.n_observations() == 0 || self.n_samples() == 0
    }

    /// Sum of one sample's values, or `None` if the sample does not exist.
    fn sample_sum(&self, sample_id: &str) -> Option<f64> {
        self.sample_values(sample_id)
            .map(|values| values.iter().sum())
    }
}
