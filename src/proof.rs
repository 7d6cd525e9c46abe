// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

//! Aggregate possession proofs.
//!
//! The server folds every challenged chunk into a single scalar-sized triple
//! `(R, sigma, mu)`; the auditor recomputes the pairing identity
//! `R * e(sigma^gamma, g) = e((prod H(W_i)^{v_i})^gamma * u^mu, v)` from
//! public data. The random `r` inside `R` blinds the chunk combination, so
//! the auditor learns nothing about file contents.

use ark_bls12_381::Bls12_381;
use ark_ec::pairing::Pairing;
use ark_ec::Group;
use ark_ff::BigInteger;
use ark_ff::PrimeField;
use ark_std::{UniformRand, Zero};
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::hash::ElementHasher;
use crate::{
    CancelToken, Challenge, ChunkedSource, Error, Gt, PublicKey, Scalar, SchemeParams,
    VerificationMetadata, G1,
};

/// A scalar lifted to an unbounded non-negative integer.
fn scalar_to_integer(scalar: &Scalar) -> BigUint {
    BigUint::from_bytes_le(&scalar.into_bigint().to_bytes_le())
}

/// The server's answer to one challenge.
///
/// `mu` is carried as an unbounded integer: it is only ever used as an
/// exponent on `u`, and reducing it early would have to agree exactly with
/// the verifier's reduction, so neither side reduces at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseProof {
    commitment: Gt,
    aggregate: G1,
    mu: BigUint,
}

impl ResponseProof {
    /// Answer `challenge` from the stored file and its authenticators.
    ///
    /// Computes `R = e(u,v)^r` for fresh random `r`, aggregates
    /// `sigma = prod sigma_{s_k}^{v_k}` and `mu' = sum v_k * m_{s_k}` over
    /// the challenged chunks, and blinds the combination as
    /// `mu = r + H(R) * mu'`.
    pub fn generate<R, S>(
        rng: R,
        challenge: &Challenge,
        metadata: &VerificationMetadata,
        pk: &PublicKey,
        source: &S,
    ) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
        S: ChunkedSource + ?Sized,
    {
        Self::generate_cancellable(rng, challenge, metadata, pk, source, &CancelToken::new())
    }

    /// Like [`generate`](ResponseProof::generate), but polls `cancel` at
    /// every challenge-pair boundary.
    pub fn generate_cancellable<R, S>(
        mut rng: R,
        challenge: &Challenge,
        metadata: &VerificationMetadata,
        pk: &PublicKey,
        source: &S,
        cancel: &CancelToken,
    ) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
        S: ChunkedSource + ?Sized,
    {
        let mut hasher = ElementHasher::new()?;

        let r = Scalar::rand(&mut rng);
        let commitment = pk.euv() * r;

        // Two commutative accumulators: the integer combination of chunks
        // and the G1 product of weighted authenticators.
        let mut combined = BigUint::zero();
        let mut aggregate = G1::zero();
        for pair in challenge.pairs() {
            cancel.check()?;
            let chunk = source.chunk_integer(pair.index)?;
            combined += scalar_to_integer(&pair.weight) * chunk;
            aggregate += *metadata.authenticator(pair.index)? * pair.weight;
        }

        let gamma = hasher.hash_element_to_scalar(&commitment);
        let mu = scalar_to_integer(&r) + scalar_to_integer(&gamma) * combined;

        Ok(Self {
            commitment,
            aggregate,
            mu,
        })
    }

    /// Check the pairing identity against `challenge` using public data
    /// only.
    ///
    /// Pure: two calls over the same inputs return the same boolean, and a
    /// cryptographically rejected proof is `false`, not an error. Proof
    /// elements are passed in-process with full encodings, so strict
    /// equality applies.
    pub fn verify(
        &self,
        challenge: &Challenge,
        metadata: &VerificationMetadata,
        pk: &PublicKey,
        params: &SchemeParams,
    ) -> bool {
        let mut hasher = match ElementHasher::new() {
            Ok(hasher) => hasher,
            Err(_) => return false,
        };
        let gamma = hasher.hash_element_to_scalar(&self.commitment);

        let lhs = self.commitment + Bls12_381::pairing(self.aggregate * gamma, params.g());

        let mut tags = G1::zero();
        for pair in challenge.pairs() {
            let h_i = match hasher.hash_chunk_tag(metadata.name(), pair.index) {
                Ok(point) => point,
                Err(_) => return false,
            };
            tags += h_i * pair.weight;
        }
        let t = tags * gamma + pk.u().mul_bigint(self.mu.to_u64_digits());

        lhs == Bls12_381::pairing(t, pk.v())
    }

    /// The blinding commitment `R = e(u,v)^r`.
    pub fn commitment(&self) -> Gt {
        self.commitment
    }

    /// The aggregate authenticator `sigma`.
    pub fn aggregate(&self) -> G1 {
        self.aggregate
    }

    /// The blinded chunk combination `mu`.
    pub fn mu(&self) -> &BigUint {
        &self.mu
    }

    /// Split into `(commitment, aggregate, mu)` for transport.
    pub fn into_parts(self) -> (Gt, G1, BigUint) {
        (self.commitment, self.aggregate, self.mu)
    }

    /// Reassemble a proof from its transported parts.
    pub fn from_parts(commitment: Gt, aggregate: G1, mu: BigUint) -> Self {
        Self {
            commitment,
            aggregate,
            mu,
        }
    }
}
