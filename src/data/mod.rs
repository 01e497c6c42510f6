//! Data structures for the dysbiosis index.

mod abundance_table;
mod dense_table;
mod metadata;
mod result;
mod table;

pub use abundance_table::AbundanceTable;
pub use dense_table::DenseTable;
pub use metadata::{split_lineage, ObservationMetadata, LINEAGE_DELIMITER};
pub use result::{IndexResultSet, IndexScore, IndexSummary};
pub use table::ObservationTable;
