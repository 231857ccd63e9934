//! RNG module - seeded randomness for entity selection and hint shuffling.
//!
//! A small LCG keeps sessions reproducible: the same seed and the same inputs
//! produce the same sequence of questions and the same multiple-choice order.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct QuizRng {
    state: u32,
}

impl QuizRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero under the multiplier alone.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32 with a=1664525, c=1013904223
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    ///
    /// Uses the high bits of a 64-bit product rather than `%`, since the low
    /// bits of an LCG have short periods.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let r = self.next_u32() as u64;
        ((r * len as u64) >> 32) as usize
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Pick one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let i = self.next_index(slice.len());
        slice.get(i)
    }

    /// Current state, usable as a seed to replay from this point.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for QuizRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = QuizRng::new(12345);
        let mut rng2 = QuizRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = QuizRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_index_in_range() {
        let mut rng = QuizRng::new(7);
        for len in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_index(len) < len);
            }
        }
    }

    #[test]
    fn test_next_index_covers_all_slots() {
        let mut rng = QuizRng::new(99);
        let mut hits = [0u32; 5];
        for _ in 0..5000 {
            hits[rng.next_index(5)] += 1;
        }
        // Roughly uniform: every slot well above zero.
        assert!(hits.iter().all(|&h| h > 700), "{:?}", hits);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = QuizRng::new(3);
        let mut v: Vec<u32> = (0..10).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = QuizRng::new(3);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[42]), Some(&42));
    }
}
