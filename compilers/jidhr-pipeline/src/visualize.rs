use std::fs;
use std::path::Path;

use jidhr_graph::{group_by_root, render_atlas};
use tracing::{info, info_span};

use crate::error::PipelineError;
use crate::table::{self, TableOptions};

/// Renders one Graphviz page per root of a flattened tree table. Returns the
/// number of pages written.
pub fn run_visualize(
    input: &Path,
    output: &Path,
    options: &TableOptions,
) -> Result<usize, PipelineError> {
    let _span = info_span!("visualize", input = %input.display()).entered();

    let rows = table::read_tree_rows(input, options)?;
    let graphs = group_by_root(&rows);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| PipelineError::io(parent, err))?;
    }
    fs::write(output, render_atlas(&graphs)).map_err(|err| PipelineError::io(output, err))?;

    info!(
        "All derivational trees have been saved to: {}",
        output.display()
    );
    Ok(graphs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jidhr_protocol::TreeRow;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_page_per_root() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trees.csv");
        let output = dir.path().join("pages").join("trees.dot");
        let options = TableOptions::default();

        let rows: Vec<TreeRow> = ["ktb", "drs", "ktb"]
            .iter()
            .enumerate()
            .map(|(i, root)| TreeRow {
                root: root.to_string(),
                lemma: format!("child{i}"),
                pos: "NOUN".to_string(),
                parent_lemma: root.to_string(),
                parent_pos: "ROOT".to_string(),
                ..TreeRow::default()
            })
            .collect();
        table::write_tree_rows(&input, &rows, &options).unwrap();

        let pages = run_visualize(&input, &output, &options).unwrap();

        assert_eq!(pages, 2);
        let dot = fs::read_to_string(&output).unwrap();
        assert_eq!(dot.matches("digraph ").count(), 2);
    }

    #[test]
    fn test_tree_table_without_parent_columns_is_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trees.csv");
        fs::write(&input, "ROOT,LEMMA,POS\nktb,kataba,VERB\n").unwrap();

        let err = run_visualize(&input, &dir.path().join("trees.dot"), &TableOptions::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumns { .. }));
    }
}
