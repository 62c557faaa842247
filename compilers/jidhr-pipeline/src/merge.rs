use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexSet;
use jidhr_protocol::schema::{LEMMA, PATTERN_ABSTRACT, POS, ROOT};
use jidhr_protocol::ROOT_TAG;
use tracing::{debug, info, info_span, warn};

use crate::error::PipelineError;
use crate::table::{Table, TableOptions};

/// Joins the lemma table with the relation table on `(PATTERN_ABSTRACT, POS)`
/// after giving every root its synthetic apex row.
///
/// Relation columns that clash with a lemma column are dropped; the lemma
/// value is kept.
pub fn merge_tables(mut lemmas: Table, relations: Table) -> Result<Table, PipelineError> {
    lemmas.require("lemma table", &[ROOT, POS, PATTERN_ABSTRACT])?;
    relations.require("relation table", &[POS, PATTERN_ABSTRACT])?;

    lemmas.dedup_rows();
    let lemmas = with_apex_rows(lemmas);

    let mut merged = inner_join(&lemmas, &relations);
    merged.dedup_rows();
    Ok(merged)
}

/// Reads both inputs, merges them and writes the result.
pub fn run_merge(
    relations_path: &Path,
    lemmas_path: &Path,
    output_path: &Path,
    options: &TableOptions,
) -> Result<usize, PipelineError> {
    let _span = info_span!("merge", output = %output_path.display()).entered();

    let relations = Table::read(relations_path, options)?;
    let lemmas = Table::read(lemmas_path, options)?;
    let merged = merge_tables(lemmas, relations)?;
    if merged.is_empty() {
        warn!("No lemma row matched a relation row; the merged table has no rows.");
    }
    merged.write(output_path, options)?;

    info!(
        "Successfully written {} rows to '{}'.",
        merged.len(),
        output_path.display()
    );
    Ok(merged.len())
}

/// Prepends one `ROOT`/`ROOT` row per distinct root, in first-seen order.
fn with_apex_rows(mut lemmas: Table) -> Table {
    let lemma_col = lemmas.ensure_column(LEMMA);
    let (root_col, pos_col, pattern_col) = match (
        lemmas.column(ROOT),
        lemmas.column(POS),
        lemmas.column(PATTERN_ABSTRACT),
    ) {
        (Some(root), Some(pos), Some(pattern)) => (root, pos, pattern),
        _ => return lemmas,
    };

    let roots: IndexSet<&str> = lemmas.rows.iter().map(|row| row[root_col].as_str()).collect();
    let mut table = Table::new(lemmas.headers.iter().cloned());
    for root in &roots {
        let mut row = vec![String::new(); lemmas.headers.len()];
        row[root_col] = root.to_string();
        row[pos_col] = ROOT_TAG.to_string();
        row[pattern_col] = ROOT_TAG.to_string();
        row[lemma_col] = root.to_string();
        table.push_row(row);
    }
    debug!(roots = roots.len(), "synthesized apex rows");

    table.rows.extend(lemmas.rows.iter().cloned());
    table
}

fn inner_join(lemmas: &Table, relations: &Table) -> Table {
    let key_cols = |table: &Table| (table.column(POS), table.column(PATTERN_ABSTRACT));
    let (Some(l_pos), Some(l_pattern)) = key_cols(lemmas) else {
        return Table::new(lemmas.headers.iter().cloned());
    };
    let (Some(r_pos), Some(r_pattern)) = key_cols(relations) else {
        return Table::new(lemmas.headers.iter().cloned());
    };

    // Relation columns carried into the output, skipping join keys and clashes.
    let carried: Vec<usize> = relations
        .headers
        .iter()
        .enumerate()
        .filter(|&(index, name)| {
            if index == r_pos || index == r_pattern {
                return false;
            }
            if lemmas.column(name).is_some() {
                debug!(column = %name, "relation column shadowed by lemma column");
                return false;
            }
            true
        })
        .map(|(index, _)| index)
        .collect();

    let mut by_key: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
    for (index, row) in relations.rows.iter().enumerate() {
        by_key
            .entry((row[r_pos].as_str(), row[r_pattern].as_str()))
            .or_default()
            .push(index);
    }

    let mut merged = Table::new(
        lemmas
            .headers
            .iter()
            .chain(carried.iter().map(|&index| &relations.headers[index]))
            .cloned(),
    );
    for row in &lemmas.rows {
        let key = (row[l_pos].as_str(), row[l_pattern].as_str());
        let Some(matches) = by_key.get(&key) else {
            continue;
        };
        for &rel_index in matches {
            let relation = &relations.rows[rel_index];
            let mut joined = row.clone();
            joined.extend(carried.iter().map(|&index| relation[index].clone()));
            merged.push_row(joined);
        }
    }
    merged
}
