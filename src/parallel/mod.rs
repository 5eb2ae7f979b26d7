pub mod indexer;
pub mod sorter;
