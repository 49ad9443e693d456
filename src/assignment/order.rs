//! Source ordering with a configurable tie-break
//!
//! Sources of equal rank are shuffled before ranking so that repeated runs
//! spread the first pick across players. `TieBreak::Stable` turns the
//! shuffle off; `TieBreak::Seeded` makes it reproducible.

use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Reverse;

use crate::core::config::TieBreak;

/// Random source for tie-breaking; a no-op when stable
#[derive(Debug, Clone)]
pub struct SourceOrder {
    rng: Option<ChaCha8Rng>,
}

impl SourceOrder {
    pub fn new(tie_break: TieBreak) -> Self {
        let rng = match tie_break {
            TieBreak::Stable => None,
            TieBreak::Seeded { seed } => Some(ChaCha8Rng::seed_from_u64(seed)),
            TieBreak::Random => Some(ChaCha8Rng::seed_from_u64(rand::random())),
        };
        Self { rng }
    }

    pub fn shuffle(&mut self, items: &mut [usize]) {
        if let Some(rng) = self.rng.as_mut() {
            items.shuffle(rng);
        }
    }

    /// `items` sorted by `key` descending, ties in shuffled (or roster) order
    pub fn ranked(&mut self, items: &[usize], key: impl Fn(usize) -> f64) -> Vec<usize> {
        let mut ranked = items.to_vec();
        self.shuffle(&mut ranked);
        ranked.sort_by_key(|&i| Reverse(OrderedFloat(key(i))));
        ranked
    }
}
