// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use ark_std::UniformRand;
use num_bigint::{BigUint, RandBigInt};
use num_traits::ToPrimitive;
use rand_core::{CryptoRng, RngCore};

use crate::{Error, Scalar};

/// One spot check: the chunk index to probe and its random weighting scalar.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChallengePair {
    /// Index of the probed chunk, in `[0, chunk_count)`.
    pub index: u32,
    /// Uniformly random weight applied to the chunk and its authenticator.
    pub weight: Scalar,
}

/// A fresh audit challenge: a sample of chunk indices with random weights.
///
/// Indices are sampled with replacement, so a pair may repeat. The challenge
/// is immutable after construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Challenge {
    pairs: Vec<ChallengePair>,
}

impl Challenge {
    /// Sample a challenge of `count` pairs over a file of `chunk_count`
    /// chunks.
    ///
    /// Indices are drawn uniformly below `chunk_count` through the
    /// arbitrary-precision uniform sampler, not by reducing raw random bits.
    /// `count = 0` yields an empty challenge; `chunk_count = 0` with a
    /// non-zero `count` is an input error.
    pub fn generate<R: RngCore + CryptoRng>(
        mut rng: R,
        count: u32,
        chunk_count: u32,
    ) -> Result<Self, Error> {
        if count == 0 {
            return Ok(Self { pairs: Vec::new() });
        }
        if chunk_count == 0 {
            return Err(Error::EmptyFile);
        }
        let bound = BigUint::from(chunk_count);
        let mut pairs = Vec::new();
        pairs
            .try_reserve_exact(count as usize)
            .map_err(|_| Error::Allocation)?;
        for _ in 0..count {
            let index = rng
                .gen_biguint_below(&bound)
                .to_u32()
                .expect("sample lies below a u32 bound");
            pairs.push(ChallengePair {
                index,
                weight: Scalar::rand(&mut rng),
            });
        }
        Ok(Self { pairs })
    }

    /// Reassemble a challenge from explicit pairs, e.g. after transport.
    pub fn from_pairs(pairs: Vec<ChallengePair>) -> Self {
        Self { pairs }
    }

    /// The sampled pairs, in generation order.
    pub fn pairs(&self) -> &[ChallengePair] {
        &self.pairs
    }

    /// Number of pairs in the challenge.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the challenge samples nothing.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn empty_challenge_is_a_no_op() {
        let challenge = Challenge::generate(thread_rng(), 0, 0).unwrap();
        assert!(challenge.is_empty());
    }

    #[test]
    fn challenging_an_empty_file_is_an_input_error() {
        assert_eq!(
            Challenge::generate(thread_rng(), 4, 0).unwrap_err(),
            Error::EmptyFile
        );
    }

    #[test]
    fn sampled_indices_stay_in_range() {
        let challenge = Challenge::generate(thread_rng(), 200, 7).unwrap();
        assert_eq!(challenge.len(), 200);
        assert!(challenge.pairs().iter().all(|pair| pair.index < 7));
    }

    #[test]
    fn two_generations_differ() {
        let a = Challenge::generate(thread_rng(), 8, 1_000).unwrap();
        let b = Challenge::generate(thread_rng(), 8, 1_000).unwrap();
        assert_ne!(a, b);
    }
}
