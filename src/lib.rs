//! Probabilistic word segmenter for Khmer text.
//!
//! Given a line of Unicode text, [`segmenter::KhmerSegmenter::segment`]
//! returns an ordered sequence of substrings whose concatenation equals the
//! input (modulo U+200B removal) and whose boundaries reflect a
//! maximum-likelihood decomposition into known words, number/currency
//! groups, acronyms, separators, and structurally coherent unknown
//! clusters.

pub mod classify;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod postprocess;
pub mod segmenter;
pub mod trie;
pub mod viterbi;
