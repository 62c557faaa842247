use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use indexmap::IndexMap;
use jidhr_protocol::TreeRow;
use std::collections::HashMap;

/// A node of the drawn tree: one lemma under one part of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub lemma: String,
    pub lemma_ara: String,
    pub pos: String,
}

impl Lexeme {
    /// Two-line caption: Arabic form and transliteration, then the POS tag.
    pub fn label(&self) -> String {
        format!("{} ({})\nPOS: {}", self.lemma_ara, self.lemma, self.pos)
    }
}

/// Edge weight: the derivation class the child was produced under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub der_class: String,
}

/// The derivation tree of one root, rebuilt from flattened rows as a graph.
///
/// Nodes are identified by `(lemma, pos)`; the first row that mentions a node
/// decides its label, and the first row linking two nodes decides the edge label.
pub struct DerivationGraph {
    root: String,
    graph: Graph<Lexeme, Derivation, Directed>,
    index_map: HashMap<(String, String), NodeIndex>,
}

impl DerivationGraph {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            graph: Graph::new(),
            index_map: HashMap::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn title(&self) -> String {
        format!("Derivational Tree for ROOT: {}", self.root)
    }

    pub fn inner(&self) -> &Graph<Lexeme, Derivation, Directed> {
        &self.graph
    }

    pub fn add_lexeme(&mut self, lemma: &str, pos: &str, lemma_ara: &str) -> NodeIndex {
        let key = (lemma.to_string(), pos.to_string());
        if let Some(idx) = self.index_map.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(Lexeme {
            lemma: key.0.clone(),
            lemma_ara: lemma_ara.to_string(),
            pos: key.1.clone(),
        });
        self.index_map.insert(key, idx);
        idx
    }

    /// Adds the parent -> child edge a row describes. Returns `false` if the
    /// edge was already present.
    pub fn add_derivation(&mut self, row: &TreeRow) -> bool {
        let from = self.add_lexeme(&row.parent_lemma, &row.parent_pos, &row.parent_lemma_ara);
        let to = self.add_lexeme(&row.lemma, &row.pos, &row.lemma_ara);

        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, Derivation { der_class: row.der_class.clone() });
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// One graph per distinct `ROOT`, in the order roots first appear.
pub fn group_by_root(rows: &[TreeRow]) -> Vec<DerivationGraph> {
    let mut graphs: IndexMap<&str, DerivationGraph> = IndexMap::new();
    for row in rows {
        graphs
            .entry(row.root.as_str())
            .or_insert_with(|| DerivationGraph::new(row.root.as_str()))
            .add_derivation(row);
    }
    graphs.into_values().collect()
}
