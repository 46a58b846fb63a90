//! Random number utilities for row and feature subsampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// A wrapper for the random generator driving all subsampling decisions.
///
/// Every engine instance owns one `Random`, seeded from its configuration,
/// so that fits are reproducible and independent engines never share state.
#[derive(Debug)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Constructor, seeded from entropy
    pub fn new() -> Self {
        Random {
            rng: StdRng::from_entropy(),
        }
    }

    /// Constructor, with specific seed
    pub fn with_seed(seed: u64) -> Self {
        Random {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a random index in `[0, bound)`
    pub fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Sample K data from {0,1,...,N-1} without replacement.
    /// Returns K ordered sampled data from {0,1,...,N-1}.
    pub fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
        if n == 0 || k == 0 {
            return Vec::new();
        }
        if k >= n {
            return (0..n).collect();
        }

        // Floyd's sampling: k distinct values in k draws
        let mut sample_set = HashSet::with_capacity(k);
        for r in (n - k)..n {
            let v = self.next_index(r + 1);
            if !sample_set.insert(v) {
                sample_set.insert(r);
            }
        }
        let mut indices: Vec<usize> = sample_set.into_iter().collect();
        indices.sort_unstable();
        indices
    }

    /// Bootstrap sample: `n` draws from `[0, n)` with replacement
    pub fn bootstrap(&mut self, n: usize) -> Vec<usize> {
        (0..n).map(|_| self.next_index(n)).collect()
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_with_seed() {
        let mut rng1 = Random::with_seed(123456789);
        let mut rng2 = Random::with_seed(123456789);

        // Same seed should produce same results
        assert_eq!(rng1.next_index(100), rng2.next_index(100));
        assert_eq!(rng1.sample(50, 10), rng2.sample(50, 10));
        assert_eq!(rng1.bootstrap(20), rng2.bootstrap(20));
    }

    #[test]
    fn test_next_index_bounds() {
        let mut rng = Random::with_seed(42);
        for _ in 0..100 {
            let val = rng.next_index(20);
            assert!(val < 20);
        }
    }

    #[test]
    fn test_sample_edge_cases() {
        let mut rng = Random::with_seed(42);

        // k == 0 should return an empty vector
        assert_eq!(rng.sample(5, 0).len(), 0);

        // k == n should return all elements
        assert_eq!(rng.sample(5, 5), vec![0, 1, 2, 3, 4]);

        // k > n degenerates to the full range
        assert_eq!(rng.sample(5, 10), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sample_normal_case() {
        let mut rng = Random::with_seed(42);
        let result = rng.sample(10, 3);

        assert_eq!(result.len(), 3);
        // Check all elements are unique and in range
        let mut unique_check = HashSet::new();
        for &val in &result {
            assert!(unique_check.insert(val));
            assert!(val < 10);
        }

        // Check result is sorted
        let mut sorted_result = result.clone();
        sorted_result.sort_unstable();
        assert_eq!(result, sorted_result);
    }

    #[test]
    fn test_bootstrap() {
        let mut rng = Random::with_seed(7);
        let result = rng.bootstrap(25);

        assert_eq!(result.len(), 25);
        assert!(result.iter().all(|&i| i < 25));
    }
}
