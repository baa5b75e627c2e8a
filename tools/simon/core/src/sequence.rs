use heapless::Vec;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::region::Region;

pub const MAX_SEQUENCE_CAPACITY: usize = 100;

pub type Sequence = Vec<Region, MAX_SEQUENCE_CAPACITY>;

/// The round's symbols and how many of them are in play.
///
/// Only the owner mutates it; playback and verification borrow it read-only
/// and never look past `active_length`.
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    sequence: Sequence,
    active_length: usize,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `symbols` in, keeping at most [`MAX_SEQUENCE_CAPACITY`].
    ///
    /// The active length is clamped to the new sequence.
    pub fn set_sequence(&mut self, symbols: &[Region]) {
        if symbols.len() > MAX_SEQUENCE_CAPACITY {
            warn!("sequence of {} symbols truncated to {}", symbols.len(), MAX_SEQUENCE_CAPACITY);
        }

        self.sequence.clear();
        for symbol in symbols.iter().take(MAX_SEQUENCE_CAPACITY) {
            // capacity checked by take()
            let _ = self.sequence.push(*symbol);
        }

        self.active_length = self.active_length.min(self.sequence.len());
    }

    /// Sets how many leading symbols are in play, clamped to `1..=len`.
    pub fn set_active_length(&mut self, length: usize) {
        let clamped = length.clamp(1, self.sequence.len().max(1));
        if clamped != length {
            warn!("active length {} clamped to {}", length, clamped);
        }
        self.active_length = if self.sequence.is_empty() { 0 } else { clamped };
    }

    #[inline(always)]
    pub fn active_length(&self) -> usize {
        self.active_length
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The symbol at `index`, as long as it is inside the active prefix.
    #[inline(always)]
    pub fn value_at(&self, index: usize) -> Option<Region> {
        if index < self.active_length {
            self.sequence.get(index).copied()
        } else {
            None
        }
    }

    pub fn active(&self) -> &[Region] {
        &self.sequence[..self.active_length]
    }

    /// The whole sequence, including symbols not yet in play.
    pub fn symbols(&self) -> &[Region] {
        &self.sequence
    }
}

/// Source of fresh round sequences.
pub trait SequenceGenerator {
    fn generate(&mut self, seed: u64, length: usize, out: &mut Sequence);
}

/// Uniformly random symbols from a seeded `SmallRng`.
#[derive(Debug, Default, Copy, Clone)]
pub struct RandomSequence;

impl SequenceGenerator for RandomSequence {
    fn generate(&mut self, seed: u64, length: usize, out: &mut Sequence) {
        let mut rng = SmallRng::seed_from_u64(seed);
        out.clear();
        for _ in 0..length.min(MAX_SEQUENCE_CAPACITY) {
            let _ = out.push(Region::from_index(rng.gen_range(0..4)));
        }
        debug!("generated {} symbols from seed {:#x}", out.len(), seed);
    }
}

/// Always produces the same pattern, repeated to fill the requested length.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    pattern: Sequence,
}

impl FixedSequence {
    pub fn new(pattern: &[Region]) -> Self {
        let mut store = SequenceStore::new();
        store.set_sequence(pattern);
        Self { pattern: store.sequence }
    }
}

impl SequenceGenerator for FixedSequence {
    fn generate(&mut self, _seed: u64, length: usize, out: &mut Sequence) {
        out.clear();
        if self.pattern.is_empty() {
            return;
        }
        for symbol in self.pattern.iter().cycle().take(length.min(MAX_SEQUENCE_CAPACITY)) {
            let _ = out.push(*symbol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Region::*;

    #[test]
    fn only_the_active_prefix_is_visible() {
        let mut store = SequenceStore::new();
        store.set_sequence(&[TopLeft, TopRight, BottomLeft, BottomRight]);
        store.set_active_length(2);

        assert_eq!(store.active(), &[TopLeft, TopRight]);
        assert_eq!(store.value_at(1), Some(TopRight));
        assert_eq!(store.value_at(2), None);
        assert_eq!(store.symbols().len(), 4);
    }

    #[test]
    fn active_length_is_clamped() {
        let mut store = SequenceStore::new();
        store.set_sequence(&[TopLeft, TopRight, BottomLeft]);
        store.set_active_length(0);
        assert_eq!(store.active_length(), 1);
        store.set_active_length(9);
        assert_eq!(store.active_length(), 3);

        store.set_sequence(&[BottomRight]);
        assert_eq!(store.active_length(), 1);
    }

    #[test]
    fn random_sequences_are_reproducible_per_seed() {
        let mut a = Sequence::new();
        let mut b = Sequence::new();
        RandomSequence.generate(42, 20, &mut a);
        RandomSequence.generate(42, 20, &mut b);
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_sequence_repeats_its_pattern() {
        let mut out = Sequence::new();
        FixedSequence::new(&[TopLeft, BottomRight]).generate(7, 5, &mut out);
        assert_eq!(&out[..], &[TopLeft, BottomRight, TopLeft, BottomRight, TopLeft]);
    }
}
