#![no_std]

extern crate alloc;

// proptest needs std in tests
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod builder;
pub mod error;
pub mod flatten;
pub mod node;

pub use builder::{build, children_of};
pub use error::TreeError;
pub use flatten::{flatten, flatten_to_vec, Flatten};
pub use node::TreeNode;
