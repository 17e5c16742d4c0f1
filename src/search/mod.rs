//! Post-build search index partitioning.

mod partition;
mod types;

pub use partition::{
    SearchIndexPartitioner,
    split_index,
};
pub use types::{
    PartitionError,
    PartitionReport,
    SEARCH_INDEX_PATH,
    WrittenPartition,
};
