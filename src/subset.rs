//! Random subsets of an oracle, used to hand a model a fraction of the test cases.
//!
//! The subset size is `ceil(n * percent / 100)`, capped at `n`. Blank lines are not test cases and
//! are never sampled.

use rand::Rng;
use rand::seq::SliceRandom;

/// Number of lines drawn from `total` for `percent`.
pub fn subset_size(total: usize, percent: u32) -> usize {
    let size = (total as u64 * u64::from(percent)).div_ceil(100);
    usize::try_from(size).map_or(total, |size| size.min(total))
}

/// Draw a uniformly random subset of the non-blank lines of `oracle`.
pub fn sample_subset<'a, R: Rng + ?Sized>(oracle: &'a str, percent: u32, rng: &mut R) -> Vec<&'a str> {
    let mut lines: Vec<&str> = oracle.lines().filter(|line| !line.trim().is_empty()).collect();
    let size = subset_size(lines.len(), percent);
    lines.shuffle(rng);
    lines.truncate(size);
    lines
}
