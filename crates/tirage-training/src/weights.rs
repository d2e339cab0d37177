//! Weight vector operations.
//!
//! These functions build and modify the raw weight vectors wrapped by
//! [`Chromosome`](crate::chromosome::Chromosome):
//!
//! - **Initialization**: [`random`] draws every weight uniformly
//! - **Crossover**: [`blx_alpha`] blends two parents (genetic search only)
//! - **Mutation**: [`mutate`] adds Gaussian noise (genetic search only)
//!
//! Weights are never normalized. Only their relative magnitude matters when module scores
//! are combined, so a vector and any positive multiple of it sample identically.

use rand::Rng;
use rand_distr::Normal;

/// Creates a weight vector by applying a function to each index.
///
/// # Examples
///
/// ```
/// use tirage_training::weights;
///
/// let weights = weights::from_fn(|i| 1.0 / (i as f32 + 1.0), 4);
/// assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0, 0.25]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Generates `len` weights independently sampled from `[0.0, max_weight)`.
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(0.0..max_weight), len)
}

/// BLX-α crossover between two parent weight vectors.
///
/// For each position, the child weight is drawn uniformly from the parents' interval
/// widened by `alpha` times its length on both sides, then clamped to `[0, max_weight]`.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| {
            let min = f32::min(p1[i], p2[i]);
            let max = f32::max(p1[i], p2[i]);
            let d = max - min;
            rng.random_range((min - alpha * d)..=(max + alpha * d))
                .clamp(0.0, max_weight)
        },
        p1.len(),
    )
}

/// Gaussian mutation in place.
///
/// Each weight is perturbed with probability `rate` by a sample of `noise`, then clamped
/// to `[0, max_weight]`.
pub fn mutate<R>(weights: &mut [f32], noise: &Normal<f32>, max_weight: f32, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for w in weights {
        if rng.random_bool(rate) {
            *w = (*w + rng.sample(noise)).clamp(0.0, max_weight);
        }
    }
}
