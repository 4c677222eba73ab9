use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Chooses which letters of an answer a hint reveals
pub trait HintPicker {
    /// Char indices to reveal, sorted ascending
    fn pick(&mut self, answer: &str) -> Vec<usize>;
}

/// Random letter choice via [`pick_positions`]
pub struct RandomHintPicker {
    rng: StdRng,
}

impl RandomHintPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomHintPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl HintPicker for RandomHintPicker {
    fn pick(&mut self, answer: &str) -> Vec<usize> {
        pick_positions(answer, &mut self.rng)
    }
}

/// How many letters a hint reveals for `answer`
pub fn reveal_count(answer: &str) -> usize {
    let letters = candidates(answer).len();
    let wanted = match letters {
        0..=4 => 1,
        5..=8 => 2,
        _ => 3,
    };
    wanted.min(letters)
}

/// Char indices of `answer` to reveal, sorted ascending.
///
/// Positions holding the same letter (case-insensitive) are only picked
/// together when there are not enough distinct letters to go round.
pub fn pick_positions<R: Rng + ?Sized>(answer: &str, rng: &mut R) -> Vec<usize> {
    let count = reveal_count(answer);
    let mut pool = candidates(answer);
    pool.shuffle(rng);

    let mut picked = Vec::with_capacity(count);
    let mut seen = HashSet::new();
    let mut repeats = Vec::new();

    for (idx, ch) in pool {
        if picked.len() == count {
            break;
        }
        if seen.insert(ch) {
            picked.push(idx);
        } else {
            repeats.push(idx);
        }
    }

    let missing = count - picked.len();
    picked.extend(repeats.into_iter().take(missing));
    picked.sort_unstable();
    picked
}

/// `answer` with unrevealed letters replaced by `_`
pub fn masked_answer(answer: &str, revealed: &[usize]) -> String {
    answer
        .chars()
        .enumerate()
        .map(|(idx, ch)| {
            if ch.is_whitespace() || revealed.contains(&idx) {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn candidates(answer: &str) -> Vec<(usize, char)> {
    answer
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(idx, ch)| (idx, ch.to_lowercase().next().unwrap_or(ch)))
        .collect()
}
