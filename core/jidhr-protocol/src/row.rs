use alloc::string::String;
use crate::record::Record;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One edge of a derivation tree, denormalized: the child's fields followed by
/// its direct parent's fields. Field order matches the written column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct TreeRow {
    #[cfg_attr(feature = "serde", serde(rename = "ROOT"))]
    pub root: String,
    #[cfg_attr(feature = "serde", serde(rename = "LEMMA"))]
    pub lemma: String,
    #[cfg_attr(feature = "serde", serde(rename = "POS"))]
    pub pos: String,
    #[cfg_attr(feature = "serde", serde(rename = "LEMMA_ARA", default))]
    pub lemma_ara: String,
    #[cfg_attr(feature = "serde", serde(rename = "DER_CLASS"))]
    pub der_class: String,
    #[cfg_attr(feature = "serde", serde(rename = "GLOSS"))]
    pub gloss: String,
    #[cfg_attr(feature = "serde", serde(rename = "FUNCTION"))]
    pub function: String,
    #[cfg_attr(feature = "serde", serde(rename = "PATTERN_ABSTRACT"))]
    pub pattern: String,

    #[cfg_attr(feature = "serde", serde(rename = "PARENT_LEMMA"))]
    pub parent_lemma: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_POS"))]
    pub parent_pos: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_LEMMA_ARA", default))]
    pub parent_lemma_ara: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_DER_CLASS"))]
    pub parent_der_class: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_GLOSS"))]
    pub parent_gloss: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_FUNCTION"))]
    pub parent_function: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_PATTERN_ABSTRACT"))]
    pub parent_pattern: String,
}

impl TreeRow {
    /// Captures `child` together with the record it was attached under.
    pub fn link(child: &Record, parent: &Record) -> Self {
        Self {
            root: child.root.clone(),
            lemma: child.lemma.clone(),
            pos: child.pos.clone(),
            lemma_ara: child.lemma_ara.clone(),
            der_class: child.derivation_class.clone(),
            gloss: child.gloss.clone(),
            function: child.function.clone(),
            pattern: child.pattern.clone(),
            parent_lemma: parent.lemma.clone(),
            parent_pos: parent.pos.clone(),
            parent_lemma_ara: parent.lemma_ara.clone(),
            parent_der_class: parent.derivation_class.clone(),
            parent_gloss: parent.gloss.clone(),
            parent_function: parent.function.clone(),
            parent_pattern: parent.pattern.clone(),
        }
    }

    /// Cell values in output column order.
    pub fn cells(&self) -> [&str; 15] {
        [
            &self.root,
            &self.lemma,
            &self.pos,
            &self.lemma_ara,
            &self.der_class,
            &self.gloss,
            &self.function,
            &self.pattern,
            &self.parent_lemma,
            &self.parent_pos,
            &self.parent_lemma_ara,
            &self.parent_der_class,
            &self.parent_gloss,
            &self.parent_function,
            &self.parent_pattern,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OUTPUT_COLUMNS;
    use alloc::string::ToString;

    #[test]
    fn test_link_copies_child_and_parent_fields() {
        let parent = Record {
            root: "drs".to_string(),
            lemma: "darasa".to_string(),
            pos: "VERB".to_string(),
            lemma_ara: "درس".to_string(),
            derivation_class: "MASDAR".to_string(),
            gloss: "to study".to_string(),
            function: "ACTION".to_string(),
            pattern: "CaCaCa".to_string(),
            ..Record::default()
        };
        let child = Record {
            root: "drs".to_string(),
            lemma: "madrasa".to_string(),
            pos: "NOUN".to_string(),
            lemma_ara: "مدرسة".to_string(),
            derivation_class: "PLACE".to_string(),
            gloss: "school".to_string(),
            function: "LOCATION".to_string(),
            pattern: "maCCaCa".to_string(),
            parent_pos: "VERB".to_string(),
            parent_pattern: "CaCaCa".to_string(),
        };

        let row = TreeRow::link(&child, &parent);

        assert_eq!(row.root, "drs");
        assert_eq!(row.der_class, "PLACE");
        assert_eq!(row.parent_lemma, "darasa");
        assert_eq!(row.parent_der_class, "MASDAR");
        assert_eq!(row.parent_pattern, "CaCaCa");
        assert_eq!(row.cells().len(), OUTPUT_COLUMNS.len());
        assert_eq!(row.cells()[8], "darasa");
    }
}
