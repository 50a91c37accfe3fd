//! Forward dynamic-programming pass over code points, producing a raw
//! segmentation before post-processing.
//!
//! Five transition classes (dictionary, number/currency, separator,
//! acronym, unknown cluster) are evaluated additively at every reachable
//! position; a repair-mode fallback takes over when the previous code
//! point was coeng or the current one is a dependent vowel. `parent` is
//! only updated on strict cost decrease, so back-trace is deterministic
//! given the fixed class-evaluation order below.

use std::cell::RefCell;

use crate::classify::{acronym_length, acronym_start, khmer_cluster_length, number_length};
use crate::constants::{is_coeng, is_currency_symbol, is_dependent_vowel, is_digit, is_khmer_char, is_separator, is_valid_single_word};
use crate::dictionary::Dictionary;

const REPAIR_PENALTY: f32 = 50.0;
const NUMBER_STEP_COST: f32 = 1.0;
const SEPARATOR_STEP_COST: f32 = 0.1;
const ACRONYM_STEP_COST: f32 = 1.0;
const INVALID_SINGLE_PENALTY: f32 = 10.0;

thread_local! {
    static SCRATCH: RefCell<(Vec<f32>, Vec<i32>)> = RefCell::new((Vec::new(), Vec::new()));
}

/// Run the DP forward pass over `cps` and back-trace into a flat list of
/// code-point spans `(start, end)` in left-to-right order.
///
/// `cps` must be non-empty; the façade short-circuits the empty-input case
/// before calling this.
pub fn decode(cps: &[char], dictionary: &Dictionary) -> Vec<(usize, usize)> {
    let n = cps.len();

    SCRATCH.with(|scratch| {
        let mut scratch = scratch.borrow_mut();
        let (cost, parent) = &mut *scratch;

        grow(cost, parent, n + 1);
        cost[0] = 0.0;
        parent[0] = 0;
        for slot in cost.iter_mut().take(n + 1).skip(1) {
            *slot = f32::INFINITY;
        }
        for slot in parent.iter_mut().take(n + 1).skip(1) {
            *slot = -1;
        }

        let max_word_length = dictionary.max_word_length();

        for i in 0..n {
            if cost[i] == f32::INFINITY {
                continue;
            }
            let c = cps[i];

            let repair = (i > 0 && is_coeng(cps[i - 1])) || is_dependent_vowel(c);
            if repair {
                relax(cost, parent, i, i + 1, dictionary.unknown_cost() + REPAIR_PENALTY, n);
                continue;
            }

            // Class 1: number / currency group.
            let currency_then_digit = is_currency_symbol(c) && i + 1 < n && is_digit(cps[i + 1]);
            if is_digit(c) || currency_then_digit {
                let len = number_length(cps, i);
                if len > 0 {
                    relax(cost, parent, i, i + len, NUMBER_STEP_COST, n);
                }
            }

            // Class 2: separator (only when the number/currency trigger
            // did not fire).
            if !(is_digit(c) || currency_then_digit) && is_separator(c) {
                relax(cost, parent, i, i + 1, SEPARATOR_STEP_COST, n);
            }

            // Class 3: acronym.
            if acronym_start(cps, i) {
                let len = acronym_length(cps, i);
                relax(cost, parent, i, i + len, ACRONYM_STEP_COST, n);
            }

            // Class 4: dictionary.
            let end_limit = (i + max_word_length).min(n);
            for j in (i + 1)..=end_limit {
                if let Some(word_cost) = dictionary.lookup_codepoints(cps, i, j) {
                    relax(cost, parent, i, j, word_cost, n);
                }
            }

            // Class 5: unknown cluster.
            if is_khmer_char(c) {
                let len = khmer_cluster_length(cps, i);
                let mut step_cost = dictionary.unknown_cost();
                if len == 1 && !is_valid_single_word(c) {
                    step_cost += INVALID_SINGLE_PENALTY;
                }
                relax(cost, parent, i, i + len, step_cost, n);
            } else {
                relax(cost, parent, i, i + 1, dictionary.unknown_cost(), n);
            }
        }

        back_trace(parent, n)
    })
}

#[inline]
fn relax(cost: &mut [f32], parent: &mut [i32], i: usize, j: usize, step_cost: f32, n: usize) {
    if j > n {
        return;
    }
    let new_cost = cost[i] + step_cost;
    if new_cost < cost[j] {
        cost[j] = new_cost;
        parent[j] = i as i32;
    }
}

fn grow(cost: &mut Vec<f32>, parent: &mut Vec<i32>, len: usize) {
    if cost.len() < len {
        cost.resize(len.next_power_of_two().max(len), 0.0);
    }
    if parent.len() < len {
        parent.resize(len.next_power_of_two().max(len), -1);
    }
}

fn back_trace(parent: &[i32], n: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut curr = n;

    while curr > 0 {
        let prev = parent[curr];
        if prev < 0 {
            tracing::error!(position = curr, "back-trace hit an unreachable position, truncating");
            break;
        }
        let prev = prev as usize;
        spans.push((prev, curr));
        curr = prev;
    }

    spans.reverse();
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_grows_geometrically_and_is_reused() {
        SCRATCH.with(|s| {
            let (cost, parent) = &mut *s.borrow_mut();
            grow(cost, parent, 10);
            assert!(cost.len() >= 10);
            assert!(parent.len() >= 10);
            let cap_before = cost.len();
            grow(cost, parent, 5);
            assert_eq!(cost.len(), cap_before);
        });
    }

    #[test]
    fn relax_respects_strict_decrease() {
        let mut cost = vec![0.0, f32::INFINITY];
        let mut parent = vec![0, -1];
        relax(&mut cost, &mut parent, 0, 1, 5.0, 1);
        assert_eq!(cost[1], 5.0);
        relax(&mut cost, &mut parent, 0, 1, 5.0, 1);
        assert_eq!(parent[1], 0);
        relax(&mut cost, &mut parent, 0, 1, 10.0, 1);
        assert_eq!(cost[1], 5.0, "equal-or-higher cost must not overwrite");
    }
}
