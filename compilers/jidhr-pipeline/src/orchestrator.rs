//! Per-root driver around the tree kernel.
//!
//! Input rows are grouped by `ROOT` in the order the roots are first seen.
//! Each group is built into a tree and flattened on its own, and the flattened
//! rows are concatenated in group order.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use jidhr_protocol::{Record, TreeRow};
use jidhr_tree::{build, flatten_to_vec, TreeError};
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Dispatch};

use crate::error::PipelineError;
use crate::table::{self, TableOptions};

/// A root group that produced no tree. The run carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionWarning {
    #[error("No 'ROOT' found for root '{root}'. Skipping this tree.")]
    MissingRoot { root: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionOutcome {
    Built { rows: Vec<TreeRow>, nodes: usize },
    Skipped(PartitionWarning),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub rows: Vec<TreeRow>,
    pub warnings: Vec<PartitionWarning>,
    /// Distinct root identifiers seen in the input.
    pub partitions: usize,
    /// Partitions that produced a tree.
    pub trees: usize,
}

/// Builds one tree per root and logs through the dispatcher it was given,
/// never through a process-wide subscriber.
pub struct Orchestrator {
    log: Dispatch,
    options: TableOptions,
}

impl Orchestrator {
    pub fn new(log: Dispatch) -> Self {
        Self { log, options: TableOptions::default() }
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds and flattens every root group of `records`.
    pub fn run(&self, records: Vec<Record>) -> Result<BuildReport, PipelineError> {
        tracing::dispatcher::with_default(&self.log, || self.build_all(records))
    }

    /// Reads `input`, builds every tree and writes the flattened rows to
    /// `output`. Nothing is written unless every partition built.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<BuildReport, PipelineError> {
        tracing::dispatcher::with_default(&self.log, || {
            let _span = info_span!("build", input = %input.display()).entered();

            let records = table::read_records(input, &self.options)?;
            let report = self.build_all(records)?;
            table::write_tree_rows(output, &report.rows, &self.options)?;

            info!(
                "Build process completed successfully. Output saved to: {}",
                output.display()
            );
            Ok(report)
        })
    }

    fn build_all(&self, records: Vec<Record>) -> Result<BuildReport, PipelineError> {
        let partitions = partition(records);
        let mut report = BuildReport { partitions: partitions.len(), ..BuildReport::default() };

        for (root, records) in partitions {
            match build_partition(&root, records)? {
                PartitionOutcome::Built { rows, nodes } => {
                    debug!(root = %root, nodes, rows = rows.len(), "built tree");
                    report.trees += 1;
                    report.rows.extend(rows);
                }
                PartitionOutcome::Skipped(warning) => {
                    warn!("{}", warning);
                    report.warnings.push(warning);
                }
            }
        }

        info!(
            partitions = report.partitions,
            trees = report.trees,
            rows = report.rows.len(),
            "flattened all trees"
        );
        Ok(report)
    }
}

/// Groups records by root identifier, keeping first-seen root order and input
/// order within each group.
pub fn partition(records: Vec<Record>) -> IndexMap<String, Vec<Record>> {
    let mut groups: IndexMap<String, Vec<Record>> = IndexMap::new();
    for record in records {
        groups.entry(record.root.clone()).or_default().push(record);
    }
    groups
}

/// Builds and flattens one root group.
///
/// The first `ROOT`-tagged record of the group becomes the apex. The group is
/// then deduplicated by `(lemma, pattern)` and searched for the apex's
/// descendants.
pub fn build_partition(
    root: &str,
    mut records: Vec<Record>,
) -> Result<PartitionOutcome, TreeError> {
    let Some(apex) = records.iter().find(|record| record.is_root()).cloned() else {
        return Ok(PartitionOutcome::Skipped(PartitionWarning::MissingRoot {
            root: root.to_string(),
        }));
    };
    dedup_by_lemma_pattern(&mut records);

    let tree = build(&records, &apex)?;
    let rows = flatten_to_vec(&tree);
    Ok(PartitionOutcome::Built { nodes: tree.node_count(), rows })
}

fn dedup_by_lemma_pattern(records: &mut Vec<Record>) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::new();
        records.iter().map(|record| seen.insert(record.dedup_key())).collect()
    };
    let mut keep = keep.into_iter();
    records.retain(|_| keep.next().unwrap_or(true));
}
