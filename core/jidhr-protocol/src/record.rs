use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Part-of-speech and pattern value carried by the synthetic apex of every family.
pub const ROOT_TAG: &str = "ROOT";

/// The (part-of-speech, abstract pattern) pair a record is matched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature<'a> {
    pub pos: &'a str,
    pub pattern: &'a str,
}

impl<'a> Signature<'a> {
    pub const fn new(pos: &'a str, pattern: &'a str) -> Self {
        Self { pos, pattern }
    }
}

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pos, self.pattern)
    }
}

/// One lexical entry of a derivation family, as read from the merged table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Record {
    #[cfg_attr(feature = "serde", serde(rename = "ROOT"))]
    pub root: String,
    #[cfg_attr(feature = "serde", serde(rename = "LEMMA"))]
    pub lemma: String,
    #[cfg_attr(feature = "serde", serde(rename = "POS"))]
    pub pos: String,
    /// Arabic-script form. Older exports omit the column entirely.
    #[cfg_attr(feature = "serde", serde(rename = "LEMMA_ARA", default))]
    pub lemma_ara: String,
    #[cfg_attr(feature = "serde", serde(rename = "CHILD_DER_CAT"))]
    pub derivation_class: String,
    #[cfg_attr(feature = "serde", serde(rename = "GLOSS"))]
    pub gloss: String,
    #[cfg_attr(feature = "serde", serde(rename = "FUNCTION"))]
    pub function: String,
    #[cfg_attr(feature = "serde", serde(rename = "PATTERN_ABSTRACT"))]
    pub pattern: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_POS"))]
    pub parent_pos: String,
    #[cfg_attr(feature = "serde", serde(rename = "PARENT_PATTERN_ABSTRACT"))]
    pub parent_pattern: String,
}

impl Record {
    /// The signature children use to point at this record.
    pub fn signature(&self) -> Signature<'_> {
        Signature::new(&self.pos, &self.pattern)
    }

    /// The signature this record declares for its parent.
    pub fn parent_signature(&self) -> Signature<'_> {
        Signature::new(&self.parent_pos, &self.parent_pattern)
    }

    /// True for the synthetic apex row of a family.
    pub fn is_root(&self) -> bool {
        self.pos == ROOT_TAG
    }

    /// True if `self` may hang directly below `parent`.
    pub fn derives_from(&self, parent: &Record) -> bool {
        self.parent_signature() == parent.signature()
    }

    /// Key used to collapse repeated derivation paths.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.lemma, &self.pattern)
    }
}
