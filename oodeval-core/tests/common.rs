use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

// Draws `n` scores from N(mean, std) with a fixed seed.
#[allow(dead_code)]
pub(crate) fn gaussian_scores(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).expect("valid normal parameters");
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}
