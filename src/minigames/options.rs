//! Multiple-choice answer sets.

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

/// `count` distinct options drawn from `range`, shuffled, containing
/// `correct` exactly once. When the range is too narrow to supply enough
/// distinct wrong answers the remainder is taken from just above it.
pub fn distinct_options<R: Rng>(
    correct: u32,
    range: RangeInclusive<u32>,
    count: usize,
    rng: &mut R,
) -> Vec<u32> {
    let mut options = vec![correct];
    let mut pool: Vec<u32> = range.clone().filter(|&n| n != correct).collect();
    pool.shuffle(rng);
    options.extend(pool.into_iter().take(count.saturating_sub(1)));

    let mut next = (*range.end()).max(correct).saturating_add(1);
    while options.len() < count {
        if !options.contains(&next) {
            options.push(next);
        }
        next = next.saturating_add(1);
    }

    options.shuffle(rng);
    options
}

/// Index of the first option equal to `correct`.
pub fn correct_index(options: &[u32], correct: u32) -> Option<usize> {
    options.iter().position(|&o| o == correct)
}
