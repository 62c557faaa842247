#![no_std] // The tree kernel only needs alloc

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod record;
pub mod row;
pub mod schema;

// Re-export core types for convenience
pub use record::{Record, Signature, ROOT_TAG};
pub use row::TreeRow;
pub use schema::{
    missing_columns, OUTPUT_COLUMNS, REQUIRED_INPUT_COLUMNS, REQUIRED_OUTPUT_COLUMNS,
};
