//! Microbial Dysbiosis Index Library
//!
//! Computes a per-sample dysbiosis index from a sparse, annotated abundance
//! table: the natural log of the summed abundance of observations known to
//! increase under a condition over the summed abundance of observations
//! known to decrease.
//!
//! # Overview
//!
//! - **data**: Abundance tables (sparse and dense), observation metadata, results
//! - **filter**: Observation filtering by metadata membership
//! - **index**: The index computation and its configuration
//!
//! # Example
//!
//! ```
//! use dysbiosis_index::prelude::*;
//! use sprs::TriMat;
//! use std::collections::HashSet;
//!
//! let mut tri_mat = TriMat::new((2, 2));
//! tri_mat.add_triplet(0, 0, 4.0);
//! tri_mat.add_triplet(1, 0, 2.0);
//! let table = AbundanceTable::new(
//!     tri_mat.to_csr(),
//!     vec!["otu_1".into(), "otu_2".into()],
//!     vec!["S1".into(), "S2".into()],
//!     vec![
//!         ObservationMetadata::new().with_lineage("taxonomy", "k__Bacteria; f__Enterobacteriaceae"),
//!         ObservationMetadata::new().with_lineage("taxonomy", "k__Bacteria; o__Bacteroidales"),
//!     ],
//! )
//! .unwrap();
//!
//! let increased: HashSet<String> = ["f__Enterobacteriaceae".to_string()].into();
//! let decreased: HashSet<String> = ["o__Bacteroidales".to_string()].into();
//!
//! let results: IndexResultSet = compute_index(&table, &increased, &decreased, "taxonomy")
//!     .unwrap()
//!     .collect();
//!
//! assert!((results.get("S1").unwrap() - 2f64.ln()).abs() < 1e-12);
//! assert!(results.get("S2").unwrap().is_nan());
//! ```

pub mod data;
pub mod error;
pub mod filter;
pub mod index;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{
        split_lineage, AbundanceTable, DenseTable, IndexResultSet, IndexScore, IndexSummary,
        ObservationMetadata, ObservationTable,
    };
    pub use crate::error::{DysbiosisError, Group, Result};
    pub use crate::filter::{
        filter_by_membership, filter_by_membership_with_stats, matches_membership,
        MembershipFilterResult,
    };
    pub use crate::index::{compute_index, log_ratio, IndexConfig, IndexIter};
}
