//! Dysbiosis index computation.

pub mod config;
pub mod dysbiosis;

pub use config::IndexConfig;
pub use dysbiosis::{compute_index, log_ratio, IndexIter};
