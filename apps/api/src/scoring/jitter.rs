//! Injectable randomness for score jitter and nondeterministic branches.
//!
//! Heuristic scores carry a small bounded random addition so that near-identical
//! inputs do not produce visually identical results. The random source is always
//! passed in, never reached for inline, so tests can pin it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bounded random draws used by the heuristic scorers.
pub trait Jitter {
    /// Uniform integer in `[0, span)`. Returns 0 when `span` is 0.
    fn roll(&mut self, span: u32) -> u32;

    /// Fair coin. `true` means "take the optional branch".
    fn coin_flip(&mut self) -> bool;
}

impl<R: Rng> Jitter for R {
    fn roll(&mut self, span: u32) -> u32 {
        if span == 0 {
            return 0;
        }
        self.gen_range(0..span)
    }

    fn coin_flip(&mut self) -> bool {
        self.gen::<f64>() > 0.5
    }
}

/// How request handlers obtain their random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JitterMode {
    /// Fresh entropy per request.
    Random,
    /// Every request seeded identically; heuristic output becomes reproducible.
    Seeded(u64),
}

impl JitterMode {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(JitterMode::Seeded).unwrap_or(JitterMode::Random)
    }

    pub fn rng(&self) -> StdRng {
        match self {
            JitterMode::Random => StdRng::from_entropy(),
            JitterMode::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}

/// Deterministic jitter: every roll returns the same offset (capped below `span`),
/// every coin flip returns the same answer.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter {
    pub offset: u32,
    pub coin: bool,
}

#[cfg(test)]
impl FixedJitter {
    pub fn low() -> Self {
        Self {
            offset: 0,
            coin: false,
        }
    }

    pub fn high() -> Self {
        Self {
            offset: u32::MAX,
            coin: true,
        }
    }
}

#[cfg(test)]
impl Jitter for FixedJitter {
    fn roll(&mut self, span: u32) -> u32 {
        if span == 0 {
            0
        } else {
            self.offset.min(span - 1)
        }
    }

    fn coin_flip(&mut self) -> bool {
        self.coin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_stays_below_span() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.roll(15) < 15);
        }
    }

    #[test]
    fn test_roll_zero_span_is_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(rng.roll(0), 0);
    }

    #[test]
    fn test_seeded_mode_is_reproducible() {
        let mode = JitterMode::from_seed(Some(42));
        let a: Vec<u32> = {
            let mut rng = mode.rng();
            (0..10).map(|_| rng.roll(100)).collect()
        };
        let b: Vec<u32> = {
            let mut rng = mode.rng();
            (0..10).map(|_| rng.roll(100)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_seed_means_random_mode() {
        assert_eq!(JitterMode::from_seed(None), JitterMode::Random);
    }

    #[test]
    fn test_fixed_jitter_caps_offset() {
        let mut high = FixedJitter::high();
        assert_eq!(high.roll(15), 14);
        assert!(high.coin_flip());
        let mut low = FixedJitter::low();
        assert_eq!(low.roll(15), 0);
        assert!(!low.coin_flip());
    }
}
