use rand::Rng;

use crate::weights;

/// Weight vector combining the score tables of a [`ScoreProfile`](tirage_scoring::ScoreProfile).
///
/// Weight `i` scales the scores of module `i`. A chromosome is a plain value: two
/// chromosomes with equal weights are interchangeable.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    weights: Vec<f32>,
}

impl Chromosome {
    #[must_use]
    pub fn new(weights: Vec<f32>) -> Self {
        Self { weights }
    }

    /// Draws `len` weights independently from `Uniform(0, 1)`.
    ///
    /// Weights are not normalized.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(weights::random(rng, 1.0, len))
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// A chromosome together with its evaluated fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessRecord {
    pub chromosome: Chromosome,
    pub fitness: f32,
}

impl FitnessRecord {
    #[must_use]
    pub fn new(chromosome: Chromosome, fitness: f32) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_random_length_matches_request() {
        let mut rng = Pcg64::seed_from_u64(7);
        for len in [0, 1, 3, 17] {
            assert_eq!(Chromosome::random(&mut rng, len).len(), len);
        }
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Chromosome::random(&mut Pcg64::seed_from_u64(11), 6);
        let b = Chromosome::random(&mut Pcg64::seed_from_u64(11), 6);
        assert_eq!(a, b);
    }
}
