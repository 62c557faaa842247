use std::path::PathBuf;

use jidhr_tree::TreeError;
use thiserror::Error;

/// Failures that abort a stage. Skippable conditions are reported through
/// [`PartitionWarning`](crate::PartitionWarning) instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required columns in {table}: {}", .missing.join(", "))]
    MissingColumns { table: String, missing: Vec<String> },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PipelineError::Csv { path: path.into(), source }
    }

    pub(crate) fn missing_columns(table: impl Into<String>, missing: &[&str]) -> Self {
        PipelineError::MissingColumns {
            table: table.into(),
            missing: missing.iter().map(|name| name.to_string()).collect(),
        }
    }
}
