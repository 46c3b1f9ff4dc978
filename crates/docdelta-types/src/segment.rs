use serde::{Deserialize, Serialize};

/// Which side(s) of a text diff a segment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Only in the new text.
    Added,
    /// Only in the old text.
    Removed,
    /// In both texts.
    Unchanged,
}

/// One run of a character diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Removed, text)
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Unchanged, text)
    }

    /// Length in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this segment is part of the old text.
    pub fn in_old(&self) -> bool {
        self.kind != SegmentKind::Added
    }

    /// Whether this segment is part of the new text.
    pub fn in_new(&self) -> bool {
        self.kind != SegmentKind::Removed
    }
}

/// Rebuild the old text from a segment list.
pub fn old_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.in_old())
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the new text from a segment list.
pub fn new_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.in_new())
        .map(|s| s.text.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilds_each_side() {
        let segments = vec![
            DiffSegment::unchanged("The "),
            DiffSegment::removed("cat"),
            DiffSegment::added("dog"),
            DiffSegment::unchanged(" sat"),
        ];
        assert_eq!(old_text(&segments), "The cat sat");
        assert_eq!(new_text(&segments), "The dog sat");
    }

    #[test]
    fn serializes_kind_as_type() {
        let json = serde_json::to_value(DiffSegment::added("x")).unwrap();
        assert_eq!(json["type"], "added");
        assert_eq!(json["text"], "x");
    }
}
