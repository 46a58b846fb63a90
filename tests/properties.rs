//! Property-based tests for the metric and sampling utilities.

use ensembles_rust::{rmse, ForestConfig, Random};
use ndarray::Array1;
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn prop_rmse_of_identical_vectors_is_zero(
        values in prop::collection::vec(-1e6f64..1e6, 1..64)
    ) {
        let y = Array1::from_vec(values);
        prop_assert_eq!(rmse(y.view(), y.view()), 0.0);
    }

    #[test]
    fn prop_rmse_is_symmetric(
        pairs in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..64)
    ) {
        let a = Array1::from_vec(pairs.iter().map(|p| p.0).collect());
        let b = Array1::from_vec(pairs.iter().map(|p| p.1).collect());
        prop_assert_eq!(rmse(a.view(), b.view()), rmse(b.view(), a.view()));
    }

    #[test]
    fn prop_rmse_is_non_negative(
        pairs in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..64)
    ) {
        let a = Array1::from_vec(pairs.iter().map(|p| p.0).collect());
        let b = Array1::from_vec(pairs.iter().map(|p| p.1).collect());
        prop_assert!(rmse(a.view(), b.view()) >= 0.0);
    }

    #[test]
    fn prop_sample_draws_ordered_distinct_indices(
        (n, k) in (1usize..200).prop_flat_map(|n| (Just(n), 1usize..=n)),
        seed in any::<u64>()
    ) {
        let mut rng = Random::with_seed(seed);
        let drawn = rng.sample(n, k);

        prop_assert_eq!(drawn.len(), k);
        prop_assert!(drawn.iter().all(|&i| i < n));
        prop_assert!(drawn.windows(2).all(|w| w[0] < w[1]));

        let unique: HashSet<_> = drawn.iter().collect();
        prop_assert_eq!(unique.len(), k);
    }

    #[test]
    fn prop_bootstrap_covers_the_index_range(
        n in 1usize..200,
        seed in any::<u64>()
    ) {
        let mut rng = Random::with_seed(seed);
        let drawn = rng.bootstrap(n);

        prop_assert_eq!(drawn.len(), n);
        prop_assert!(drawn.iter().all(|&i| i < n));
    }

    #[test]
    fn prop_feature_subset_size_stays_in_bounds(
        num_features in 1usize..500,
        fraction in prop::option::of(1e-4f64..=1.0)
    ) {
        let mut builder = ForestConfig::builder();
        if let Some(fraction) = fraction {
            builder = builder.feature_fraction(fraction);
        }
        let config = builder.build().unwrap();

        let k = config.feature_subset_size(num_features);
        prop_assert!(k >= 1);
        prop_assert!(k <= num_features);
    }

    #[test]
    fn prop_seeded_random_is_deterministic(seed in any::<u64>()) {
        let mut a = Random::with_seed(seed);
        let mut b = Random::with_seed(seed);

        prop_assert_eq!(a.bootstrap(50), b.bootstrap(50));
        prop_assert_eq!(a.sample(100, 20), b.sample(100, 20));
        prop_assert_eq!(a.next_index(1000), b.next_index(1000));
    }
}
