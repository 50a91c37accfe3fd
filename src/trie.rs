//! Prefix tree from code-point sequences to word cost.
//!
//! Khmer-range children (U+1780..17FF, 128 slots) live in a direct array
//! indexed by `cp - 0x1780` for O(1) cache-friendly stepping on the hot
//! path; everything else (ASCII dots in acronyms, stray Latin, etc.) falls
//! through to a small sparse map. Each node owns its children; the tree has
//! no cycles and no sharing, so ordinary recursive `Drop` is sufficient.

use fxhash::FxHashMap;

const KHMER_SLOTS: usize = 0x1800 - 0x1780;

#[derive(Default)]
pub struct TrieNode {
    khmer_children: Option<Box<[Option<Box<TrieNode>>; KHMER_SLOTS]>>,
    other_children: FxHashMap<char, Box<TrieNode>>,
    is_terminal: bool,
    cost: f32,
}

impl TrieNode {
    #[inline]
    fn khmer_slot(c: char) -> Option<usize> {
        let code = c as u32;
        if (0x1780..0x1800).contains(&code) {
            Some((code - 0x1780) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn get_child(&self, c: char) -> Option<&TrieNode> {
        if let Some(slot) = Self::khmer_slot(c) {
            self.khmer_children
                .as_ref()
                .and_then(|arr| arr[slot].as_deref())
        } else {
            self.other_children.get(&c).map(|b| b.as_ref())
        }
    }

    fn get_or_create_child(&mut self, c: char) -> &mut TrieNode {
        if let Some(slot) = Self::khmer_slot(c) {
            let arr = self
                .khmer_children
                .get_or_insert_with(|| Box::new(std::array::from_fn(|_| None)));
            arr[slot].get_or_insert_with(|| Box::new(TrieNode::default()))
        } else {
            self.other_children
                .entry(c)
                .or_insert_with(|| Box::new(TrieNode::default()))
        }
    }

    /// Insert `word` with final cost `cost`, creating intermediate nodes as
    /// needed. The root itself is never marked terminal by this call unless
    /// `word` is empty, which callers must not do (words are non-empty).
    pub fn insert(&mut self, word: &[char], cost: f32) {
        let mut node = self;
        for &c in word {
            node = node.get_or_create_child(c);
        }
        node.is_terminal = true;
        node.cost = cost;
    }

    /// Walk `cps[start..end]` from this node; `Some(cost)` iff the node
    /// reached at `end` is terminal.
    #[inline]
    pub fn lookup(&self, cps: &[char], start: usize, end: usize) -> Option<f32> {
        let mut node = self;
        for &c in &cps[start..end] {
            node = node.get_child(c)?;
        }
        if node.is_terminal {
            Some(node.cost)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn insert_then_lookup_roundtrips() {
        let mut root = TrieNode::default();
        let word = chars("សួស្តី");
        root.insert(&word, 1.25);
        assert_eq!(root.lookup(&word, 0, word.len()), Some(1.25));
    }

    #[test]
    fn root_is_never_terminal() {
        let root = TrieNode::default();
        assert!(!root.is_terminal());
    }

    #[test]
    fn prefix_without_terminal_flag_is_not_a_match() {
        let mut root = TrieNode::default();
        root.insert(&chars("កខគ"), 1.0);
        let probe = chars("ក");
        assert_eq!(root.lookup(&probe, 0, 1), None);
    }

    #[test]
    fn mixed_khmer_and_ascii_path() {
        let mut root = TrieNode::default();
        let word = chars("ក.");
        root.insert(&word, 2.0);
        assert_eq!(root.lookup(&word, 0, word.len()), Some(2.0));
    }
}
