//! Filtering primitives for abundance tables.

pub mod membership;

pub use membership::{
    filter_by_membership, filter_by_membership_with_stats, matches_membership,
    MembershipFilterResult,
};
