//! Post-processing of raw character edit scripts.
//!
//! The Myers search yields a minimal script, but minimal scripts over
//! characters tend to be choppy ("c[a]t" style fragments). The passes here
//! coalesce edit runs, dissolve short equalities that sit between larger
//! edits, and slide lone edits onto word and punctuation boundaries. None of
//! them changes either side's reconstructed text.

use docdelta_types::{DiffSegment, SegmentKind};

/// Working representation: text as chars so offsets stay on scalar values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Edit {
    pub kind: SegmentKind,
    pub text: Vec<char>,
}

impl Edit {
    pub fn new(kind: SegmentKind, text: Vec<char>) -> Self {
        Self { kind, text }
    }
}

/// Append characters to the trailing edit if it has the same kind.
pub(crate) fn push_chars(
    edits: &mut Vec<Edit>,
    kind: SegmentKind,
    chars: impl Iterator<Item = char>,
) {
    match edits.last_mut() {
        Some(last) if last.kind == kind => last.text.extend(chars),
        _ => edits.push(Edit::new(kind, chars.collect())),
    }
}

/// Convert back to segments, dropping empty runs and joining neighbours of
/// the same kind.
pub(crate) fn into_segments(edits: Vec<Edit>) -> Vec<DiffSegment> {
    let mut segments: Vec<DiffSegment> = Vec::with_capacity(edits.len());
    for edit in edits {
        if edit.text.is_empty() {
            continue;
        }
        match segments.last_mut() {
            Some(last) if last.kind == edit.kind => last.text.extend(edit.text),
            _ => segments.push(DiffSegment::new(
                edit.kind,
                edit.text.into_iter().collect::<String>(),
            )),
        }
    }
    segments
}

/// Normalize a script: one removal and one insertion per edit run, common
/// affixes factored out into the surrounding equalities, then lone edits
/// slid over identical neighbours until nothing moves.
pub(crate) fn merge(edits: &mut Vec<Edit>) {
    loop {
        coalesce(edits);
        if !slide_single_edits(edits) {
            break;
        }
    }
}

/// Dissolve equalities that are no longer than the edits on either side,
/// then re-merge and shift boundaries.
pub(crate) fn cleanup_semantic(edits: &mut Vec<Edit>) {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);

    let mut i = 0;
    while i < edits.len() {
        if edits[i].kind == SegmentKind::Unchanged {
            equalities.push(i);
            ins_before = ins_after;
            del_before = del_after;
            ins_after = 0;
            del_after = 0;
            last_equality = Some(edits[i].text.len());
            i += 1;
            continue;
        }

        if edits[i].kind == SegmentKind::Added {
            ins_after += edits[i].text.len();
        } else {
            del_after += edits[i].text.len();
        }

        let dissolve = last_equality.is_some_and(|len| {
            len > 0 && len <= ins_before.max(del_before) && len <= ins_after.max(del_after)
        });
        if dissolve {
            if let Some(at) = equalities.pop() {
                let text = edits[at].text.clone();
                edits.insert(at, Edit::new(SegmentKind::Removed, text));
                edits[at + 1].kind = SegmentKind::Added;
                // The preceding equality must be re-evaluated with fresh counts.
                equalities.pop();
                ins_before = 0;
                del_before = 0;
                ins_after = 0;
                del_after = 0;
                last_equality = None;
                changed = true;
                i = equalities.last().map_or(0, |&p| p + 1);
                continue;
            }
        }
        i += 1;
    }

    if changed {
        merge(edits);
    }
    shift_to_boundaries(edits);
}

/// Slide every lone edit flanked by equalities to the position whose edges
/// score best on [`boundary_score`].
pub(crate) fn shift_to_boundaries(edits: &mut Vec<Edit>) {
    let mut i = 1;
    while i + 1 < edits.len() {
        if edits[i - 1].kind != SegmentKind::Unchanged
            || edits[i + 1].kind != SegmentKind::Unchanged
            || edits[i].kind == SegmentKind::Unchanged
        {
            i += 1;
            continue;
        }

        let mut before = edits[i - 1].text.clone();
        let mut edit = edits[i].text.clone();
        let mut after = edits[i + 1].text.clone();

        // Start from the leftmost position.
        let overlap = common_suffix(&before, &edit);
        if overlap > 0 {
            let common = edit[edit.len() - overlap..].to_vec();
            before.truncate(before.len() - overlap);
            let mut shifted = common.clone();
            shifted.extend_from_slice(&edit[..edit.len() - overlap]);
            edit = shifted;
            let mut tail = common;
            tail.extend(after);
            after = tail;
        }

        let mut best_score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
        let mut best = (before.clone(), edit.clone(), after.clone());
        while !edit.is_empty() && !after.is_empty() && edit[0] == after[0] {
            let c = after.remove(0);
            before.push(edit.remove(0));
            edit.push(c);
            let score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
            // `>=` prefers the rightmost of equally good positions.
            if score >= best_score {
                best_score = score;
                best = (before.clone(), edit.clone(), after.clone());
            }
        }

        if edits[i - 1].text != best.0 {
            let (best_before, best_edit, best_after) = best;
            edits[i].text = best_edit;
            if best_after.is_empty() {
                edits.remove(i + 1);
            } else {
                edits[i + 1].text = best_after;
            }
            if best_before.is_empty() {
                edits.remove(i - 1);
                i -= 1;
            } else {
                edits[i - 1].text = best_before;
            }
        }
        i += 1;
    }
}

/// How natural a split between `one` and `two` reads. Higher is better:
/// text edges 6, blank line 5, line break 4, sentence end 3, whitespace 2,
/// other punctuation 1, mid-word 0.
fn boundary_score(one: &[char], two: &[char]) -> u8 {
    let (Some(&c1), Some(&c2)) = (one.last(), two.first()) else {
        return 6;
    };

    let non_alnum1 = !c1.is_alphanumeric();
    let non_alnum2 = !c2.is_alphanumeric();
    let space1 = non_alnum1 && c1.is_whitespace();
    let space2 = non_alnum2 && c2.is_whitespace();
    let line_break1 = space1 && matches!(c1, '\r' | '\n');
    let line_break2 = space2 && matches!(c2, '\r' | '\n');
    let blank_line1 = line_break1 && ends_with_blank_line(one);
    let blank_line2 = line_break2 && starts_with_blank_line(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alnum1 && !space1 && space2 {
        3
    } else if space1 || space2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

fn ends_with_blank_line(text: &[char]) -> bool {
    let tail: String = text[text.len().saturating_sub(3)..].iter().collect();
    tail.ends_with("\n\n") || tail.ends_with("\n\r\n")
}

fn starts_with_blank_line(text: &[char]) -> bool {
    let head: String = text.iter().take(4).collect();
    ["\n\n", "\n\r\n", "\r\n\n", "\r\n\r\n"]
        .iter()
        .any(|p| head.starts_with(p))
}

fn coalesce(edits: &mut Vec<Edit>) {
    let mut out: Vec<Edit> = Vec::with_capacity(edits.len());
    let mut removed: Vec<char> = Vec::new();
    let mut added: Vec<char> = Vec::new();

    // A trailing empty equality flushes the last edit run.
    let sentinel = Edit::new(SegmentKind::Unchanged, Vec::new());
    for edit in edits.drain(..).chain(std::iter::once(sentinel)) {
        match edit.kind {
            SegmentKind::Removed => removed.extend(edit.text),
            SegmentKind::Added => added.extend(edit.text),
            SegmentKind::Unchanged => {
                let mut equal = edit.text;
                if !removed.is_empty() && !added.is_empty() {
                    let prefix = common_prefix(&added, &removed);
                    if prefix > 0 {
                        push_equal(&mut out, &added[..prefix]);
                        added.drain(..prefix);
                        removed.drain(..prefix);
                    }
                    let suffix = common_suffix(&added, &removed);
                    if suffix > 0 {
                        let mut joined = added[added.len() - suffix..].to_vec();
                        joined.extend(equal);
                        equal = joined;
                        added.truncate(added.len() - suffix);
                        removed.truncate(removed.len() - suffix);
                    }
                }
                if !removed.is_empty() {
                    out.push(Edit::new(SegmentKind::Removed, std::mem::take(&mut removed)));
                }
                if !added.is_empty() {
                    out.push(Edit::new(SegmentKind::Added, std::mem::take(&mut added)));
                }
                push_equal(&mut out, &equal);
            }
        }
    }
    *edits = out;
}

fn push_equal(out: &mut Vec<Edit>, text: &[char]) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.kind == SegmentKind::Unchanged => last.text.extend_from_slice(text),
        _ => out.push(Edit::new(SegmentKind::Unchanged, text.to_vec())),
    }
}

/// `A<ins>BA</ins>C` becomes `<ins>AB</ins>AC`, and `A<ins>CB</ins>C`
/// becomes `AC<ins>BC</ins>`. Returns whether anything moved.
fn slide_single_edits(edits: &mut Vec<Edit>) -> bool {
    let mut changed = false;
    let mut i = 1;
    while i + 1 < edits.len() {
        let flanked = edits[i - 1].kind == SegmentKind::Unchanged
            && edits[i + 1].kind == SegmentKind::Unchanged
            && edits[i].kind != SegmentKind::Unchanged;
        if flanked {
            let prev_len = edits[i - 1].text.len();
            let next_len = edits[i + 1].text.len();
            if prev_len > 0 && edits[i].text.ends_with(&edits[i - 1].text) {
                let prev = edits[i - 1].text.clone();
                let keep = edits[i].text.len() - prev_len;
                let mut shifted = prev.clone();
                shifted.extend_from_slice(&edits[i].text[..keep]);
                edits[i].text = shifted;
                let mut next = prev;
                next.extend_from_slice(&edits[i + 1].text);
                edits[i + 1].text = next;
                edits.remove(i - 1);
                changed = true;
            } else if next_len > 0 && edits[i].text.starts_with(&edits[i + 1].text) {
                let next = edits.remove(i + 1).text;
                edits[i - 1].text.extend_from_slice(&next);
                let mut shifted = edits[i].text[next.len()..].to_vec();
                shifted.extend(next);
                edits[i].text = shifted;
                changed = true;
            }
        }
        i += 1;
    }
    changed
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
