//! The line transforms offered to the dispatch layer.
//!
//! Each is a plain function from the resolved line texts to the new line texts. `reverse` and
//! `shuffle` keep the length; `unique` may shorten it.

use std::collections::HashSet;

use rand::Rng;

/// Lines in reverse order.
pub fn reverse(mut lines: Vec<String>) -> Vec<String> {
    lines.reverse();
    lines
}

/// First occurrence of every distinct line, in original order.
pub fn unique(lines: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(lines.len());
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Fisher–Yates shuffle driven by `rng`.
pub fn shuffle<R: Rng>(mut lines: Vec<String>, rng: &mut R) -> Vec<String> {
    for i in (1..lines.len()).rev() {
        let j = rng.gen_range(0..=i);
        lines.swap(i, j);
    }
    lines
}
