//! Dictionary model: word-set construction (with orthographic-variant
//! expansion and post-hoc pruning), frequency-to-cost conversion, and the
//! character-indexed trie used by the decoder's Class 4 transitions.
//!
//! Construction follows the six-step protocol in order: load words, expand
//! variants, post-prune, load frequencies, compute costs, build trie. Once
//! built the dictionary is immutable and safe to share across threads.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fxhash::FxHashMap;

use crate::constants::{is_valid_single_word, COENG, REPETITION_MARK};
use crate::error::DictionaryError;
use crate::trie::TrieNode;

const MIN_FREQ_FLOOR: f32 = 5.0;
const UNKNOWN_COST_PENALTY: f32 = 5.0;
const OR_MARK: char = '\u{17AC}';

pub struct Dictionary {
    words: FxHashMap<String, usize>,
    costs: Vec<f32>,
    trie: TrieNode,
    max_word_length: usize,
    default_cost: f32,
    unknown_cost: f32,
}

impl Dictionary {
    pub fn new(dict_path: &Path, freq_path: &Path) -> Result<Self, DictionaryError> {
        let mut word_set = Self::load_words(dict_path)?;
        Self::post_prune(&mut word_set);

        let (word_costs, default_cost, unknown_cost) = Self::calculate_costs(freq_path, &word_set)?;

        let mut words = FxHashMap::default();
        let mut costs = Vec::with_capacity(word_set.len());
        let mut trie = TrieNode::default();
        let mut max_word_length = 0;

        for (i, word) in word_set.into_iter().enumerate() {
            let cost = *word_costs.get(&word).unwrap_or(&default_cost);
            let chars: Vec<char> = word.chars().collect();
            max_word_length = max_word_length.max(chars.len());

            trie.insert(&chars, cost);
            words.insert(word, i);
            costs.push(cost);
        }

        if words.is_empty() {
            tracing::warn!("dictionary contains zero accepted words after pruning");
        }

        Ok(Dictionary {
            words,
            costs,
            trie,
            max_word_length,
            default_cost,
            unknown_cost,
        })
    }

    /// Step 1 (read + filter) and step 2 (variant expansion) of the
    /// construction protocol.
    fn load_words(path: &Path) -> Result<HashSet<String>, DictionaryError> {
        let file = File::open(path).map_err(|e| DictionaryError::DictMissing(path.to_path_buf(), e))?;
        let reader = BufReader::new(file);

        let mut words = HashSet::new();

        for line in reader.lines() {
            let line = line.map_err(|e| DictionaryError::DictMissing(path.to_path_buf(), e))?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }

            if word.chars().count() == 1 {
                let c = word.chars().next().unwrap();
                if !is_valid_single_word(c) {
                    continue;
                }
            }

            words.insert(word.to_string());
            for variant in Self::generate_variants(word) {
                words.insert(variant);
            }
        }

        Ok(words)
    }

    /// Step 3: remove pruned compound-OR words, repetition-mark words, and
    /// anything starting with coeng.
    fn post_prune(words: &mut HashSet<String>) {
        let mut to_remove = HashSet::new();

        for word in words.iter() {
            if word.contains(OR_MARK) && word.chars().count() > 1 {
                if word.starts_with(OR_MARK) {
                    let suffix: String = word.chars().skip(1).collect();
                    if words.contains(&suffix) {
                        to_remove.insert(word.clone());
                    }
                } else if word.ends_with(OR_MARK) {
                    let mut chars: Vec<char> = word.chars().collect();
                    chars.pop();
                    let prefix: String = chars.into_iter().collect();
                    if words.contains(&prefix) {
                        to_remove.insert(word.clone());
                    }
                } else {
                    let parts: Vec<&str> = word.split(OR_MARK).collect();
                    if parts.iter().all(|p| p.is_empty() || words.contains(*p)) {
                        to_remove.insert(word.clone());
                    }
                }
            }
            if word.contains(REPETITION_MARK) {
                to_remove.insert(word.clone());
            }
            if word.starts_with(COENG) {
                to_remove.insert(word.clone());
            }
        }

        for w in to_remove {
            words.remove(&w);
        }
        let rep_mark_str = REPETITION_MARK.to_string();
        words.remove(&rep_mark_str);
    }

    /// Steps 4-5: parse the frequency file, compute effective counts (with
    /// variant back-fill), and derive per-word costs plus the
    /// default/unknown fallbacks.
    fn calculate_costs(
        path: &Path,
        word_set: &HashSet<String>,
    ) -> Result<(HashMap<String, f32>, f32, f32), DictionaryError> {
        let mut word_costs = HashMap::new();
        let mut default_cost = 10.0;
        let mut unknown_cost = 20.0;

        if !path.exists() {
            tracing::warn!(path = %path.display(), "frequency file not found, using default cost fallback");
            return Ok((word_costs, default_cost, unknown_cost));
        }

        let file = File::open(path).map_err(|e| DictionaryError::FreqUnreadable(path.to_path_buf(), e))?;
        let data: HashMap<String, f32> =
            serde_json::from_reader(file).map_err(|e| DictionaryError::FreqMalformed(path.to_path_buf(), e))?;

        let mut total_tokens = 0.0f32;
        let mut effective_counts: HashMap<String, f32> = HashMap::new();

        for (word, &count) in &data {
            let eff = count.max(MIN_FREQ_FLOOR);
            effective_counts.insert(word.clone(), eff);

            for variant in Self::generate_variants(word) {
                effective_counts.entry(variant).or_insert(eff);
            }

            // Only primary frequency-file entries count toward total_tokens;
            // backfilled variants do not, matching the reference segmenter's
            // behavior.
            total_tokens += eff;
        }

        if total_tokens > 0.0 {
            let min_prob = MIN_FREQ_FLOOR / total_tokens;
            default_cost = -min_prob.log10();
            unknown_cost = default_cost + UNKNOWN_COST_PENALTY;

            for (word, count) in effective_counts {
                if word_set.contains(&word) {
                    let prob = count / total_tokens;
                    if prob > 0.0 {
                        word_costs.insert(word, -prob.log10());
                    }
                }
            }
        }

        Ok((word_costs, default_cost, unknown_cost))
    }

    /// Ta/Da subscript swap, then Coeng-Ro reordering over the union of the
    /// original word and its Ta/Da variant(s). A single pass over loaded
    /// words, not iterated to a fixed point, matching the reference
    /// segmenter.
    fn generate_variants(word: &str) -> HashSet<String> {
        let mut variants = HashSet::new();
        let coeng_ta = "\u{17D2}\u{178F}";
        let coeng_da = "\u{17D2}\u{178D}";

        if word.contains(coeng_ta) {
            variants.insert(word.replace(coeng_ta, coeng_da));
        }
        if word.contains(coeng_da) {
            variants.insert(word.replace(coeng_da, coeng_ta));
        }

        let mut base_set = variants.clone();
        base_set.insert(word.to_string());

        let coeng = COENG;
        let ro = '\u{179A}';

        for w in base_set {
            let chars: Vec<char> = w.chars().collect();
            if chars.len() < 4 {
                continue;
            }

            // Pass 1: [Coeng, Ro, Coeng, NotRo] -> swap the two pairs.
            let mut swapped = chars.clone();
            let mut modified = false;
            let mut i = 0;
            while i + 3 < swapped.len() {
                if swapped[i] == coeng && swapped[i + 1] == ro && swapped[i + 2] == coeng && swapped[i + 3] != ro {
                    swapped.swap(i, i + 2);
                    swapped.swap(i + 1, i + 3);
                    modified = true;
                    i += 4;
                } else {
                    i += 1;
                }
            }
            if modified {
                variants.insert(swapped.iter().collect());
            }

            // Pass 2: [Coeng, NotRo, Coeng, Ro] -> swap the two pairs.
            let mut swapped2 = chars.clone();
            let mut modified2 = false;
            let mut i = 0;
            while i + 3 < swapped2.len() {
                if swapped2[i] == coeng && swapped2[i + 1] != ro && swapped2[i + 2] == coeng && swapped2[i + 3] == ro {
                    swapped2.swap(i, i + 2);
                    swapped2.swap(i + 1, i + 3);
                    modified2 = true;
                    i += 4;
                } else {
                    i += 1;
                }
            }
            if modified2 {
                variants.insert(swapped2.iter().collect());
            }
        }

        variants
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn get_word_cost(&self, word: &str) -> f32 {
        match self.words.get(word) {
            Some(&idx) => *self.costs.get(idx).unwrap_or(&self.default_cost),
            None => self.unknown_cost,
        }
    }

    /// Walk the trie over `cps[start..end]`; `Some(cost)` iff that slice is
    /// an accepted word.
    #[inline]
    pub fn lookup_codepoints(&self, cps: &[char], start: usize, end: usize) -> Option<f32> {
        self.trie.lookup(cps, start, end)
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    pub fn default_cost(&self) -> f32 {
        self.default_cost
    }

    pub fn unknown_cost(&self) -> f32 {
        self.unknown_cost
    }
}
