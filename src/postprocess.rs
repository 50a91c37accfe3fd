//! Three sequential post-processing passes over the raw Viterbi
//! segmentation, each reading the dictionary:
//!
//! - Pass A snaps isolated invalid consonants onto a neighbor.
//! - Pass B applies linguistic merge heuristics (sign/subscript rules).
//! - Pass C coalesces consecutive unknown segments into one run.

use crate::constants::{is_digit, is_separator, is_valid_single_word};
use crate::dictionary::Dictionary;

/// Pass A: snap isolated invalid single consonants onto a neighboring
/// segment, unless both neighbors are separators (in which case the
/// segment is left standing alone).
pub fn snap_invalid_singles(segments: Vec<String>, dictionary: &Dictionary) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());

    for (j, seg) in segments.iter().enumerate() {
        let mut chars = seg.chars();
        let first = chars.next();
        let is_single = first.is_some() && chars.next().is_none();
        let first = first.unwrap_or(' ');

        let is_invalid_single = is_single
            && !is_valid_single_word(first)
            && !dictionary.contains(seg)
            && !is_digit(first)
            && !is_separator(first);

        if !is_invalid_single {
            out.push(seg.clone());
            continue;
        }

        let prev_is_sep = if let Some(prev) = out.last() {
            is_boundary(prev)
        } else {
            j == 0
        };

        let next_is_sep = match segments.get(j + 1) {
            Some(next) => is_boundary(next),
            None => true,
        };

        if prev_is_sep && next_is_sep {
            out.push(seg.clone());
            continue;
        }

        if let Some(prev) = out.last() {
            let prev_first = prev.chars().next().unwrap_or(' ');
            if !is_separator(prev_first) {
                let prev = out.pop().unwrap();
                out.push(prev + seg);
                continue;
            }
        }

        out.push(seg.clone());
    }

    out
}

fn is_boundary(seg: &str) -> bool {
    let first = seg.chars().next().unwrap_or(' ');
    is_separator(first) || seg == " " || seg == "\u{200b}"
}

/// Pass B: left-to-right walk applying the consonant+sign merge rules.
/// Known-word segments pass through unchanged.
pub fn apply_heuristics(segments: Vec<String>, dictionary: &Dictionary) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(segments.len());
    let n = segments.len();
    let mut i = 0;

    while i < n {
        let curr = &segments[i];

        if dictionary.contains(curr) {
            merged.push(curr.clone());
            i += 1;
            continue;
        }

        if !merged.is_empty() && rule1_matches(curr) {
            let prev = merged.pop().unwrap();
            merged.push(prev + curr);
            i += 1;
            continue;
        }

        if i + 1 < n && rule2_matches(curr) {
            merged.push(format!("{}{}", curr, segments[i + 1]));
            i += 2;
            continue;
        }

        merged.push(curr.clone());
        i += 1;
    }

    merged
}

/// Consonant + U+17CB/17CE/17CF (2 CPs), or consonant + U+17B7 + U+17CD
/// (3 CPs) — both merge onto the previous emitted segment.
fn rule1_matches(curr: &str) -> bool {
    let mut chars = curr.chars();
    let c0 = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let c1 = chars.next();
    let c2 = chars.next();
    let is_cons = (c0 as u32) >= 0x1780 && (c0 as u32) <= 0x17A2;
    if !is_cons {
        return false;
    }

    match (c1, c2, chars.next()) {
        (Some(c1), None, None) => matches!(c1, '\u{17CB}' | '\u{17CE}' | '\u{17CF}'),
        (Some('\u{17B7}'), Some('\u{17CD}'), None) => true,
        _ => false,
    }
}

/// Consonant + U+17D0 (2 CPs) — merges with the following segment.
fn rule2_matches(curr: &str) -> bool {
    let mut chars = curr.chars();
    let c0 = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let c1 = chars.next();
    let is_cons = (c0 as u32) >= 0x1780 && (c0 as u32) <= 0x17A2;
    is_cons && c1 == Some('\u{17D0}') && chars.next().is_none()
}

/// Pass C: coalesce consecutive "unknown" segments (anything not a known
/// word, a valid single, a separator, a digit lead, or an acronym-looking
/// piece) into one run.
pub fn coalesce_unknowns(segments: Vec<String>, dictionary: &Dictionary) -> Vec<String> {
    let mut out = Vec::with_capacity(segments.len());
    let mut buffer: Vec<String> = Vec::new();

    for seg in segments {
        if is_known(&seg, dictionary) {
            if !buffer.is_empty() {
                out.push(buffer.concat());
                buffer.clear();
            }
            out.push(seg);
        } else {
            buffer.push(seg);
        }
    }

    if !buffer.is_empty() {
        out.push(buffer.concat());
    }

    out
}

fn is_known(seg: &str, dictionary: &Dictionary) -> bool {
    let mut chars = seg.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let is_single = chars.next().is_none();

    if is_digit(first) {
        return true;
    }
    if dictionary.contains(seg) {
        return true;
    }
    if is_single && is_valid_single_word(first) {
        return true;
    }
    if is_single && is_separator(first) {
        return true;
    }
    if seg.contains('.') && seg.chars().count() >= 2 {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn empty_dictionary() -> Dictionary {
        let dir = tempfile::tempdir().unwrap();
        let dict_path = dir.path().join("dict.txt");
        std::fs::write(&dict_path, "").unwrap();
        Dictionary::new(&dict_path, Path::new("/nonexistent/freq.json")).unwrap()
    }

    #[test]
    fn snap_keeps_single_between_separators() {
        let dict = empty_dictionary();
        let segments = vec![" ".to_string(), "a".to_string(), " ".to_string()];
        let result = snap_invalid_singles(segments, &dict);
        assert_eq!(result, vec![" ", "a", " "]);
    }

    #[test]
    fn snap_merges_into_previous_non_separator() {
        let dict = empty_dictionary();
        let segments = vec!["ខ".to_string(), "\u{1799}".to_string()];
        let result = snap_invalid_singles(segments, &dict);
        assert_eq!(result, vec!["ខ\u{1799}"]);
    }

    #[test]
    fn rule1_two_cp_sign_merges_with_previous() {
        let dict = empty_dictionary();
        let segments = vec!["ខ".to_string(), "ក\u{17CB}".to_string()];
        let result = apply_heuristics(segments, &dict);
        assert_eq!(result, vec!["ខក\u{17CB}"]);
    }

    #[test]
    fn rule2_merges_with_next() {
        let dict = empty_dictionary();
        let segments = vec!["ក\u{17D0}".to_string(), "ខ".to_string()];
        let result = apply_heuristics(segments, &dict);
        assert_eq!(result, vec!["ក\u{17D0}ខ"]);
    }

    #[test]
    fn coalesce_merges_consecutive_unknowns() {
        let dict = empty_dictionary();
        let segments = vec!["x".to_string(), "y".to_string(), "5".to_string()];
        let result = coalesce_unknowns(segments, &dict);
        assert_eq!(result, vec!["xy".to_string(), "5".to_string()]);
    }

    #[test]
    fn coalesce_leaves_acronym_like_segment_alone() {
        let dict = empty_dictionary();
        let segments = vec!["ក.ខ.".to_string()];
        let result = coalesce_unknowns(segments, &dict);
        assert_eq!(result, vec!["ក.ខ."]);
    }
}
