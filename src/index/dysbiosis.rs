//! Per-sample microbial dysbiosis index.
//!
//! The index follows Gevers et al. 2014 (Cell Host & Microbe 15:382), where
//! a microbial dysbiosis index was built from organisms observed to increase
//! or decrease in Crohn's disease. For every sample it is
//!
//! ```text
//! ln( Σ abundance of increased observations / Σ abundance of decreased observations )
//! ```
//!
//! Observations are assigned to a group when their metadata tokens at a
//! given key (typically the taxonomy lineage) intersect the group's
//! membership set. An observation matching both sets counts in both groups.

use crate::data::{IndexScore, ObservationTable};
use crate::error::{DysbiosisError, Group, Result};
use crate::filter::filter_by_membership_with_stats;
use std::collections::HashSet;
use std::iter::FusedIterator;

/// Compute the dysbiosis index for every sample shared by both groups.
///
/// Validation, filtering and the sample intersection run eagerly; the
/// per-sample sums are computed as the returned iterator is advanced.
///
/// # Arguments
/// * `table` - Annotated abundance table
/// * `increased` - Tokens of items observed to increase
/// * `decreased` - Tokens of items observed to decrease
/// * `key` - Observation metadata field to match against
///
/// # Errors
/// * [`DysbiosisError::MissingKey`] if the first observation has no `key`
///   field (or the table has no observations)
/// * [`DysbiosisError::EmptyGroup`] if either group matches nothing
///
/// # Scores
/// A sample whose decreased abundance is zero scores NaN. A sample whose
/// increased abundance alone is zero scores `-inf`.
pub fn compute_index<T: ObservationTable>(
    table: &T,
    increased: &HashSet<String>,
    decreased: &HashSet<String>,
    key: &str,
) -> Result<IndexIter<T>> {
    // The key schema is uniform, so one observation is representative.
    let has_key = table
        .observation_metadata()
        .first()
        .map_or(false, |md| md.contains_key(key));
    if !has_key {
        return Err(DysbiosisError::MissingKey(key.to_string()));
    }

    let overlap = increased.intersection(decreased).count();
    if overlap > 0 {
        tracing::warn!(
            key,
            overlap,
            "increased and decreased sets overlap; shared items count in both groups"
        );
    }

    let (increased_table, inc_stats) = filter_by_membership_with_stats(table, key, increased)?;
    let (decreased_table, dec_stats) = filter_by_membership_with_stats(table, key, decreased)?;
    tracing::debug!(
        key,
        observations = inc_stats.n_before,
        increased = inc_stats.n_after,
        decreased = dec_stats.n_after,
        "partitioned observations"
    );

    if increased_table.is_empty() {
        return Err(DysbiosisError::EmptyGroup(Group::Increased));
    }
    if decreased_table.is_empty() {
        return Err(DysbiosisError::EmptyGroup(Group::Decreased));
    }

    let decreased_samples: HashSet<&str> = decreased_table
        .sample_ids()
        .iter()
        .map(String::as_str)
        .collect();
    let samples: Vec<String> = increased_table
        .sample_ids()
        .iter()
        .filter(|id| decreased_samples.contains(id.as_str()))
        .cloned()
        .collect();
    tracing::debug!(samples = samples.len(), "samples present in both groups");

    Ok(IndexIter {
        increased: increased_table,
        decreased: decreased_table,
        samples: samples.into_iter(),
    })
}

/// Log-ratio of increased to decreased abundance; NaN when `decreased` is 0.
#[inline]
pub fn log_ratio(increased: f64, decreased: f64) -> f64 {
    if decreased == 0.0 {
        f64::NAN
    } else {
        (increased / decreased).ln()
    }
}

/// Lazy sequence of per-sample index scores returned by [`compute_index`].
#[derive(Debug)]
pub struct IndexIter<T> {
    increased: T,
    decreased: T,
    samples: std::vec::IntoIter<String>,
}

impl<T: ObservationTable> IndexIter<T> {
    /// The sub-table of observations matching the increased set.
    pub fn increased_table(&self) -> &T {
        &self.increased
    }

    /// The sub-table of observations matching the decreased set.
    pub fn decreased_table(&self) -> &T {
        &self.decreased
    }
}

impl<T: ObservationTable> Iterator for IndexIter<T> {
    type Item = IndexScore;

    fn next(&mut self) -> Option<IndexScore> {
        let sample_id = self.samples.next()?;
        let inc_count = self.increased.sample_sum(&sample_id).unwrap_or(0.0);
        let dec_count = self.decreased.sample_sum(&sample_id).unwrap_or(0.0);
        let score = log_ratio(inc_count, dec_count);
        Some(IndexScore { sample_id, score })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

impl<T: ObservationTable> ExactSizeIterator for IndexIter<T> {}

impl<T: ObservationTable> FusedIterator for IndexIter<T> {}
