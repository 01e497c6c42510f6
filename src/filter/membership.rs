//! Membership-based observation filtering.

use crate::data::{ObservationMetadata, ObservationTable};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Check whether an observation's tokens at `key` intersect `members`.
///
/// Observations without `key` never match. The index only checks the first
/// observation for the key, so a later observation lacking it is a
/// non-match rather than a missing-key error.
pub fn matches_membership(
    metadata: &ObservationMetadata,
    key: &str,
    members: &HashSet<String>,
) -> bool {
    metadata
        .get(key)
        .map_or(false, |tokens| tokens.iter().any(|t| members.contains(t)))
}

/// Filter observations by metadata membership.
///
/// Keeps observations whose metadata value at `key` shares at least one
/// token with `members`. The sample axis is left unchanged, and an empty
/// result is returned as an empty table rather than an error.
///
/// # Arguments
/// * `table` - The table to filter
/// * `key` - Metadata field holding the comparable tokens
/// * `members` - Tokens defining the group
///
/// # Returns
/// A new table of the same type containing only matching observations.
pub fn filter_by_membership<T: ObservationTable>(
    table: &T,
    key: &str,
    members: &HashSet<String>,
) -> Result<T> {
    table.filter_observations(|_, md| matches_membership(md, key, members))
}

/// Result of membership filtering with statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipFilterResult {
    /// Number of observations before filtering.
    pub n_before: usize,
    /// Number of observations after filtering.
    pub n_after: usize,
    /// Proportion of observations retained.
    pub retention_rate: f64,
}

impl std::fmt::Display for MembershipFilterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Membership Filter Result")?;
        writeln!(f, "  Before:    {} observations", self.n_before)?;
        writeln!(f, "  Matched:   {} observations", self.n_after)?;
        writeln!(f, "  Retained:  {:.1}%", self.retention_rate * 100.0)?;
        Ok(())
    }
}

/// Filter with statistics about what was kept.
pub fn filter_by_membership_with_stats<T: ObservationTable>(
    table: &T,
    key: &str,
    members: &HashSet<String>,
) -> Result<(T, MembershipFilterResult)> {
    let n_before = table.n_observations();
    let filtered = filter_by_membership(table, key, members)?;
    let n_after = filtered.n_observations();

    let retention_rate = if n_before == 0 {
        0.0
    } else {
        n_after as f64 / n_before as f64
    };

    Ok((
        filtered,
        MembershipFilterResult {
            n_before,
            n_after,
            retention_rate,
        },
    ))
}
