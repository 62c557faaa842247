use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A record's signature reappeared on the path from the apex down to it.
    CycleDetected {
        root: String,
        lemma: String,
        pos: String,
        pattern: String,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::CycleDetected { root, lemma, pos, pattern } => write!(
                f,
                "Cycle detected under root '{}': '{}' ({}/{}) derives from its own signature",
                root, lemma, pos, pattern
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}
