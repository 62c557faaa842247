//! Table stages around the derivation tree kernel: merging the raw lemma and
//! relation tables, building and flattening one tree per root, and rendering
//! the flattened trees.

pub mod error;
pub mod merge;
pub mod orchestrator;
pub mod table;
pub mod visualize;

pub use error::PipelineError;
pub use merge::{merge_tables, run_merge};
pub use orchestrator::{BuildReport, Orchestrator, PartitionOutcome, PartitionWarning};
pub use table::{Table, TableOptions};
pub use visualize::run_visualize;
