//! Bit-string genomes and the random operators that act on them.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

/// A candidate solution: fixed-length bit vector plus its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    /// Bits, each 0 or 1.
    pub bits: Vec<u8>,
    /// Fitness from the last evaluation pass that reached this genome.
    pub fitness: f64,
}

impl Genome {
    /// Wrap bits with zero fitness.
    pub fn new(bits: Vec<u8>) -> Self {
        Self { bits, fitness: 0.0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// Random number generator wrapper for genome operations.
///
/// Every random draw of a run goes through one instance, so a seed replays
/// the whole run.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Genome of `length` independent fair bits.
    pub fn random_genome(&mut self, length: usize) -> Genome {
        let bits = (0..length).map(|_| self.rng.gen_range(0..=1u8)).collect();
        Genome::new(bits)
    }

    /// Single-point crossover, gated by `rate`.
    ///
    /// The gate is always drawn first. Parents are copied unchanged when the
    /// gate fails or when `mum` and `dad` are the same slice in memory; equal
    /// contents in different genomes still recombine.
    pub fn crossover(&mut self, mum: &[u8], dad: &[u8], rate: f64) -> (Vec<u8>, Vec<u8>) {
        let len = mum.len().min(dad.len());
        if self.unit() >= rate || std::ptr::eq(mum, dad) || len < 2 {
            return (mum.to_vec(), dad.to_vec());
        }

        let point = self.rng.gen_range(1..len);

        let mut child1 = mum.to_vec();
        let mut child2 = dad.to_vec();

        child1[point..len].copy_from_slice(&dad[point..len]);
        child2[point..len].copy_from_slice(&mum[point..len]);

        (child1, child2)
    }

    /// Flip each bit independently with probability `rate`.
    pub fn mutate(&mut self, bits: &mut [u8], rate: f64) {
        for bit in bits.iter_mut() {
            if self.unit() < rate {
                *bit ^= 1;
            }
        }
    }
}

/// Number of positions at which two bit strings differ.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count() + a.len().abs_diff(b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_genome() {
        let mut rng = GenomeRng::new(42);
        let genome = rng.random_genome(70);

        assert_eq!(genome.len(), 70);
        assert_eq!(genome.fitness, 0.0);
        assert!(genome.bits.iter().all(|&b| b <= 1));
        // 70 fair bits are essentially never all equal
        assert!(genome.bits.contains(&0) && genome.bits.contains(&1));
    }

    #[test]
    fn test_same_seed_same_genomes() {
        let mut a = GenomeRng::new(7);
        let mut b = GenomeRng::new(7);
        for _ in 0..5 {
            assert_eq!(a.random_genome(32), b.random_genome(32));
        }
    }

    #[test]
    fn test_zero_crossover_rate_copies_parents() {
        let mut rng = GenomeRng::new(42);
        let mum = rng.random_genome(40);
        let dad = rng.random_genome(40);

        for _ in 0..100 {
            let (c1, c2) = rng.crossover(&mum.bits, &dad.bits, 0.0);
            assert_eq!(c1, mum.bits);
            assert_eq!(c2, dad.bits);
        }
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = GenomeRng::new(3);
        let mum = vec![0u8; 16];
        let dad = vec![1u8; 16];

        for _ in 0..50 {
            let (c1, c2) = rng.crossover(&mum, &dad, 1.0);
            let cut = c1.iter().position(|&b| b == 1).unwrap();
            assert!((1..16).contains(&cut));
            assert!(c1[..cut].iter().all(|&b| b == 0));
            assert!(c1[cut..].iter().all(|&b| b == 1));
            assert!(c2[..cut].iter().all(|&b| b == 1));
            assert!(c2[cut..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_identical_parent_instance_copied() {
        let mut rng = GenomeRng::new(11);
        let parent = rng.random_genome(24);

        let (c1, c2) = rng.crossover(&parent.bits, &parent.bits, 1.0);
        assert_eq!(c1, parent.bits);
        assert_eq!(c2, parent.bits);
    }

    #[test]
    fn test_equal_content_distinct_instances_still_cross() {
        let mut rng = GenomeRng::new(5);
        let mum = vec![0u8, 1, 0, 1, 0, 1];
        let dad = mum.clone();

        // Content is equal so the children match either way; the call must
        // still consume a cut point draw.
        let mut reference = GenomeRng::new(5);
        reference.unit();
        let _ = reference.rng.gen_range(1..6usize);
        let (c1, _) = rng.crossover(&mum, &dad, 1.0);
        assert_eq!(c1, mum);
        assert_eq!(rng.unit(), reference.unit());
    }

    #[test]
    fn test_mutation_rate_zero() {
        let mut rng = GenomeRng::new(42);
        let original = rng.random_genome(64).bits;
        let mut bits = original.clone();
        rng.mutate(&mut bits, 0.0);
        assert_eq!(bits, original);
    }

    #[test]
    fn test_mutation_rate_one_flips_every_bit() {
        let mut rng = GenomeRng::new(42);
        let original = rng.random_genome(64).bits;
        let mut bits = original.clone();
        rng.mutate(&mut bits, 1.0);
        assert!(bits.iter().zip(&original).all(|(a, b)| a != b));
        assert_eq!(hamming_distance(&bits, &original), 64);
    }

    #[test]
    fn test_hamming_distance() {
        assert_eq!(hamming_distance(&[0, 1, 1], &[0, 1, 1]), 0);
        assert_eq!(hamming_distance(&[0, 1, 1], &[1, 1, 0]), 2);
        assert_eq!(hamming_distance(&[0, 1], &[0, 1, 1]), 1);
    }
}
