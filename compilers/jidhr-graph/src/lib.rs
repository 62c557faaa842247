pub mod dot;
pub mod graph;

pub use dot::render_atlas;
pub use graph::{group_by_root, Derivation, DerivationGraph, Lexeme};
