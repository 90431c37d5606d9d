use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for move selection. Injected so random branches can be
/// driven deterministically.
pub trait MoveRng {
    /// Uniform index in `0..len`. `len` is never zero.
    fn random_index(&mut self, len: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random<T>(&mut self) -> T
    where
        rand::distr::StandardUniform: rand::distr::Distribution<T>,
    {
        self.rng.random()
    }

    /// Fresh generator seeded from this one, for work handed off to another thread.
    pub fn fork(&mut self) -> SessionRng {
        SessionRng::new(self.random())
    }
}

impl MoveRng for SessionRng {
    fn random_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..20 {
            assert_eq!(a.random_index(9), b.random_index(9));
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_random_index_in_range() {
        let mut rng = SessionRng::new(42);
        for len in 1..10 {
            assert!(rng.random_index(len) < len);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SessionRng::new(42);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }
}
