//! Randomness seam for the policy engine
//!
//! Policies never call the RNG directly; they draw through [`Sampler`] so
//! that tests can substitute a scripted sequence and drive every branch
//! (gate pass, gate fail, duplicate draws) deterministically.

use rand::Rng;
use std::collections::VecDeque;

/// Source of the random draws the selection policies consume
pub trait Sampler {
    /// Uniform draw r in [0, 1); true iff r < `probability`.
    ///
    /// A probability of 0.0 never fires and 1.0 always fires.
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index in [0, len). `len` must be at least 1.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform integer in [1, max]. `max` must be at least 1.
    fn amount(&mut self, max: usize) -> usize;
}

/// Production sampler backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSampler;

impl Sampler for ThreadSampler {
    fn chance(&mut self, probability: f64) -> bool {
        rand::thread_rng().gen::<f64>() < probability
    }

    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn amount(&mut self, max: usize) -> usize {
        rand::thread_rng().gen_range(1..=max)
    }
}

/// Deterministic sampler fed fixed draw sequences, for tests.
///
/// Each call pops the front of the corresponding queue and panics when the
/// queue is exhausted, so a test also asserts exactly how many draws the
/// policy consumed.
#[derive(Debug, Default)]
pub struct ScriptedSampler {
    chances: VecDeque<bool>,
    picks: VecDeque<usize>,
    amounts: VecDeque<usize>,
}

impl ScriptedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chances<I: IntoIterator<Item = bool>>(mut self, outcomes: I) -> Self {
        self.chances.extend(outcomes);
        self
    }

    pub fn with_picks<I: IntoIterator<Item = usize>>(mut self, indices: I) -> Self {
        self.picks.extend(indices);
        self
    }

    pub fn with_amounts<I: IntoIterator<Item = usize>>(mut self, counts: I) -> Self {
        self.amounts.extend(counts);
        self
    }

    /// True when every scripted draw has been consumed
    pub fn exhausted(&self) -> bool {
        self.chances.is_empty() && self.picks.is_empty() && self.amounts.is_empty()
    }
}

impl Sampler for ScriptedSampler {
    fn chance(&mut self, _probability: f64) -> bool {
        self.chances
            .pop_front()
            .expect("scripted sampler ran out of chance outcomes")
    }

    fn pick(&mut self, len: usize) -> usize {
        let index = self
            .picks
            .pop_front()
            .expect("scripted sampler ran out of pick indices");
        assert!(index < len, "scripted pick {index} out of range for {len} options");
        index
    }

    fn amount(&mut self, max: usize) -> usize {
        let count = self
            .amounts
            .pop_front()
            .expect("scripted sampler ran out of amounts");
        assert!(
            (1..=max).contains(&count),
            "scripted amount {count} out of range 1..={max}"
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_sampler_chance_extremes() {
        let mut sampler = ThreadSampler;
        for _ in 0..100 {
            assert!(sampler.chance(1.0));
            assert!(!sampler.chance(0.0));
        }
    }

    #[test]
    fn test_thread_sampler_ranges() {
        let mut sampler = ThreadSampler;
        for _ in 0..100 {
            assert!(sampler.pick(4) < 4);
            let n = sampler.amount(3);
            assert!((1..=3).contains(&n));
        }
        assert_eq!(sampler.pick(1), 0);
        assert_eq!(sampler.amount(1), 1);
    }

    #[test]
    fn test_scripted_sampler_replays_in_order() {
        let mut sampler = ScriptedSampler::new()
            .with_chances([true, false])
            .with_picks([2])
            .with_amounts([1]);

        assert!(sampler.chance(0.5));
        assert!(!sampler.chance(0.5));
        assert_eq!(sampler.pick(3), 2);
        assert_eq!(sampler.amount(2), 1);
        assert!(sampler.exhausted());
    }
}
