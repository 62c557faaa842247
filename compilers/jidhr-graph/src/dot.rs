//! Graphviz output. Labels are written as given: no bidi reordering, no
//! glyph shaping and no layout hints beyond node styling.

use petgraph::dot::{Config, Dot};
use tracing::debug;

use crate::graph::DerivationGraph;

impl DerivationGraph {
    /// One `digraph` block for this root.
    pub fn render_dot(&self) -> String {
        let graph = self.inner();
        let content = Dot::with_attr_getters(
            graph,
            &[Config::GraphContentOnly, Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_, edge| {
                format!(
                    "label = \"{}\" fontcolor = red fontsize = 8",
                    escape(&edge.weight().der_class)
                )
            },
            &|_, (_, lexeme)| format!("label = \"{}\"", escape(&lexeme.label())),
        );

        format!(
            "digraph \"{}\" {{\n    label = \"{}\";\n    labelloc = t;\n    node [style = filled, fillcolor = lightblue, fontsize = 8];\n{:?}}}\n",
            escape(self.root()),
            escape(&self.title()),
            content
        )
    }
}

/// Renders every root's page, separated by a blank line.
pub fn render_atlas(graphs: &[DerivationGraph]) -> String {
    let mut out = String::new();
    for (i, graph) in graphs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&graph.render_dot());
        debug!(root = graph.root(), nodes = graph.node_count(), "rendered page");
    }
    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use jidhr_protocol::TreeRow;

    fn row(root: &str, parent: &str, child: &str, der_class: &str) -> TreeRow {
        TreeRow {
            root: root.to_string(),
            lemma: child.to_string(),
            pos: "NOUN".to_string(),
            lemma_ara: "كتاب".to_string(),
            der_class: der_class.to_string(),
            parent_lemma: parent.to_string(),
            parent_pos: "ROOT".to_string(),
            ..TreeRow::default()
        }
    }

    #[test]
    fn test_page_carries_title_labels_and_edge() {
        let graphs = crate::group_by_root(&[row("ktb", "ktb", "kitaab", "NOMINAL")]);
        let dot = graphs[0].render_dot();

        assert!(dot.starts_with("digraph \"ktb\" {"));
        assert!(dot.contains("label = \"Derivational Tree for ROOT: ktb\";"));
        assert!(dot.contains("label = \"كتاب (kitaab)\\nPOS: NOUN\""));
        assert!(dot.contains(" (ktb)\\nPOS: ROOT\""));
        assert!(dot.contains("0 -> 1"));
        assert!(dot.contains("label = \"NOMINAL\""));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_atlas_has_one_page_per_root() {
        let graphs = crate::group_by_root(&[
            row("ktb", "ktb", "kitaab", "NOMINAL"),
            row("drs", "drs", "dars", "NOMINAL"),
        ]);
        let atlas = render_atlas(&graphs);
        assert_eq!(atlas.matches("digraph ").count(), 2);
        assert!(atlas.find("\"ktb\"").unwrap() < atlas.find("\"drs\"").unwrap());
    }

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }
}
