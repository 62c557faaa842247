//! Reconstructs a derivation tree from the implicit parent signatures of a
//! root family.
//!
//! A record hangs below every record whose `(pos, pattern)` equals its declared
//! `(parent_pos, parent_pattern)`. Matching is by signature, not identity, so
//! the builder keeps the signatures of the active apex-to-node path and refuses
//! to descend into one it is already inside.

use alloc::collections::BTreeSet;
use alloc::string::ToString;
use alloc::vec::Vec;

use jidhr_protocol::{Record, Signature};

use crate::error::TreeError;
use crate::node::TreeNode;

/// Builds the tree hanging below `root`, drawing candidates from `records`.
///
/// `records` is the full candidate set of one family and is searched again at
/// every level. Children appear in input order; repeated `(lemma, pattern)`
/// pairs under the same parent collapse onto the first occurrence.
///
/// # Errors
/// [`TreeError::CycleDetected`] if a candidate's signature is already on the
/// path from `root` down to it.
pub fn build<'a>(records: &'a [Record], root: &'a Record) -> Result<TreeNode<'a>, TreeError> {
    let mut path = BTreeSet::new();
    grow(records, root, &mut path)
}

fn grow<'a>(
    records: &'a [Record],
    record: &'a Record,
    path: &mut BTreeSet<Signature<'a>>,
) -> Result<TreeNode<'a>, TreeError> {
    let signature = record.signature();
    if !path.insert(signature) {
        return Err(TreeError::CycleDetected {
            root: record.root.to_string(),
            lemma: record.lemma.to_string(),
            pos: record.pos.to_string(),
            pattern: record.pattern.to_string(),
        });
    }

    let mut node = TreeNode::leaf(record);
    for candidate in children_of(records, record) {
        node.add_child(grow(records, candidate, path)?);
    }

    path.remove(&signature);
    Ok(node)
}

/// Records declaring `parent`'s signature as their own parent, deduplicated
/// by `(lemma, pattern)` with the first occurrence kept.
pub fn children_of<'a>(records: &'a [Record], parent: &Record) -> Vec<&'a Record> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter(|candidate| candidate.derives_from(parent))
        .filter(|candidate| seen.insert(candidate.dedup_key()))
        .collect()
}
