//! Distance and similarity derived from a segment list.

use docdelta_types::{DiffSegment, SegmentKind};

/// Edit distance recovered from a diff.
///
/// Every run of edits between two unchanged segments costs the larger of its
/// inserted and removed character counts (a substitution counts once).
pub fn levenshtein(segments: &[DiffSegment]) -> usize {
    let mut distance = 0;
    let mut inserted = 0;
    let mut removed = 0;
    for segment in segments {
        match segment.kind {
            SegmentKind::Added => inserted += segment.char_len(),
            SegmentKind::Removed => removed += segment.char_len(),
            SegmentKind::Unchanged => {
                distance += inserted.max(removed);
                inserted = 0;
                removed = 0;
            }
        }
    }
    distance + inserted.max(removed)
}

/// Similarity percentage in `[0, 100]`, rounded to one decimal place.
///
/// Two empty texts are identical (100); otherwise the distance is scaled by
/// the longer text's character length.
pub fn similarity_percent(distance: usize, old_len: usize, new_len: usize) -> f64 {
    let max_len = old_len.max(new_len);
    if max_len == 0 {
        return 100.0;
    }
    let kept = max_len.saturating_sub(distance);
    round_one_decimal(100.0 * kept as f64 / max_len as f64)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_counts_once() {
        let segments = vec![
            DiffSegment::unchanged("The "),
            DiffSegment::removed("cat"),
            DiffSegment::added("dog"),
            DiffSegment::unchanged(" sat"),
        ];
        assert_eq!(levenshtein(&segments), 3);
    }

    #[test]
    fn runs_are_costed_separately() {
        let segments = vec![
            DiffSegment::removed("ab"),
            DiffSegment::unchanged("x"),
            DiffSegment::added("cde"),
        ];
        assert_eq!(levenshtein(&segments), 5);
    }

    #[test]
    fn empty_texts_are_identical() {
        assert_eq!(similarity_percent(0, 0, 0), 100.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        // 2 of 3 characters kept.
        assert_eq!(similarity_percent(1, 3, 3), 66.7);
    }

    #[test]
    fn never_negative() {
        assert_eq!(similarity_percent(10, 6, 6), 0.0);
    }
}
