//! Segmenter façade: orchestrates ZWSP stripping, the Viterbi decode, and
//! the three post-processing passes behind a single `segment` operation.
//!
//! Pure and thread-safe given an immutable [`Dictionary`]: the DP scratch
//! buffers are thread-local, so concurrent calls on distinct inputs never
//! interfere with each other.

use crate::dictionary::Dictionary;
use crate::postprocess::{apply_heuristics, coalesce_unknowns, snap_invalid_singles};
use crate::viterbi::decode;

const ZWSP: char = '\u{200b}';

pub struct KhmerSegmenter {
    dictionary: Dictionary,
}

impl KhmerSegmenter {
    pub fn new(dictionary: Dictionary) -> Self {
        KhmerSegmenter { dictionary }
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        if text.contains(ZWSP) {
            let cleaned = text.replace(ZWSP, "");
            self.segment_raw(&cleaned)
        } else {
            self.segment_raw(text)
        }
    }

    fn segment_raw(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let cps: Vec<char> = text.chars().collect();
        let spans = decode(&cps, &self.dictionary);

        let raw_segments: Vec<String> = spans
            .into_iter()
            .map(|(start, end)| cps[start..end].iter().collect())
            .collect();

        let pass_a = snap_invalid_singles(raw_segments, &self.dictionary);
        let pass_b = apply_heuristics(pass_a, &self.dictionary);
        coalesce_unknowns(pass_b, &self.dictionary)
    }
}
