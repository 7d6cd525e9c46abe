// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

//! Per-file verification metadata.
//!
//! Signing a file yields one authenticator per chunk plus a signed random
//! file name. The authenticators travel to the storage server alongside the
//! file; the name and its signature stay with the auditor. Either half can
//! later be reassembled through [`VerificationMetadata::from_parts`].

use ark_bls12_381::{Bls12_381, G1Affine};
use ark_ec::pairing::Pairing;
use ark_ec::scalar_mul::fixed_base::FixedBase;
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{UniformRand, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::hash::ElementHasher;
use crate::{
    CancelToken, ChunkedSource, Error, PublicKey, Scalar, SchemeParams, SecretKey, G1,
};

/// The bits of a compressed G1 encoding that carry the sign of y, derived
/// from the serializer itself: a point and its negation share an
/// x-coordinate, so their encodings differ in exactly the sign bits.
fn y_sign_mask() -> Vec<u8> {
    let base = G1Affine::generator();
    let mut positive = Vec::new();
    base.serialize_compressed(&mut positive)
        .expect("serializing into a Vec cannot fail");
    let mut negative = Vec::new();
    (-base)
        .serialize_compressed(&mut negative)
        .expect("serializing into a Vec cannot fail");
    positive
        .iter()
        .zip(negative.iter())
        .map(|(a, b)| a ^ b)
        .collect()
}

fn clear_y_sign(encoding: &mut [u8]) {
    for (byte, mask) in encoding.iter_mut().zip(y_sign_mask()) {
        *byte &= !mask;
    }
}

/// Drop the y-coordinate sign from a compressed encoding.
fn g1_to_x_only_bytes(point: &G1) -> Vec<u8> {
    let mut bytes = Vec::new();
    point
        .serialize_compressed(&mut bytes)
        .expect("serializing into a Vec cannot fail");
    clear_y_sign(&mut bytes);
    bytes
}

/// Decode an x-only encoding; the result is the encoded point or its inverse.
fn g1_from_x_only_bytes(bytes: &[u8]) -> Option<G1> {
    let mut encoding = bytes.to_vec();
    clear_y_sign(&mut encoding);
    G1Affine::deserialize_compressed(encoding.as_slice())
        .ok()
        .map(Into::into)
}

/// The signing output for one file: a random name, the name signature, and
/// one authenticator per chunk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationMetadata {
    name: Vec<u8>,
    name_sig: Vec<u8>,
    authenticators: Vec<G1>,
}

impl VerificationMetadata {
    /// Sign every chunk of `source`: sample a fresh file name, compute
    /// `sigma_i = (H(name || i) * u^{m_i})^x` for each chunk, and sign the
    /// name under `ssk`.
    ///
    /// Fails with [`Error::EmptyFile`] on a chunkless source.
    pub fn generate<R, S>(
        rng: R,
        sk: &SecretKey,
        pk: &PublicKey,
        params: &SchemeParams,
        source: &S,
    ) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
        S: ChunkedSource + ?Sized,
    {
        Self::generate_cancellable(rng, sk, pk, params, source, &CancelToken::new())
    }

    /// Like [`generate`](VerificationMetadata::generate), but polls `cancel`
    /// at every chunk boundary. A cancelled run drops all partial state and
    /// returns [`Error::Cancelled`].
    pub fn generate_cancellable<R, S>(
        mut rng: R,
        sk: &SecretKey,
        pk: &PublicKey,
        params: &SchemeParams,
        source: &S,
        cancel: &CancelToken,
    ) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
        S: ChunkedSource + ?Sized,
    {
        let count = source.chunk_count();
        if count == 0 {
            return Err(Error::EmptyFile);
        }

        let mut hasher = ElementHasher::new()?;

        let name_elem = Scalar::rand(&mut rng);
        let name = name_elem.into_bigint().to_bytes_le();
        debug_assert_eq!(name.len(), params.name_len());

        let mut chunks = Vec::new();
        chunks
            .try_reserve_exact(count as usize)
            .map_err(|_| Error::Allocation)?;
        for i in 0..count {
            cancel.check()?;
            chunks.push(source.chunk_scalar(i)?);
        }

        // One fixed-base window table over u amortizes the n exponentiations
        // u^{m_i} across the whole file.
        let scalar_bits = Scalar::MODULUS_BIT_SIZE as usize;
        let window = FixedBase::get_mul_window_size(count as usize);
        let table = FixedBase::get_window_table(scalar_bits, window, pk.u());
        let u_powers = FixedBase::msm::<G1>(scalar_bits, window, &table, &chunks);

        let mut authenticators = Vec::new();
        authenticators
            .try_reserve_exact(count as usize)
            .map_err(|_| Error::Allocation)?;
        for (i, u_m) in u_powers.into_iter().enumerate() {
            cancel.check()?;
            let h_i = hasher.hash_chunk_tag(&name, i as u32)?;
            authenticators.push((h_i + u_m) * sk.x());
        }

        let name_sig_point = hasher.hash_bytes_to_g1(&name)? * sk.ssk();
        let name_sig = g1_to_x_only_bytes(&name_sig_point);
        debug_assert_eq!(name_sig.len(), params.sig_len());

        Ok(Self {
            name,
            name_sig,
            authenticators,
        })
    }

    /// Check that the name signature binds this file name to the owner of
    /// `pk`.
    ///
    /// The signature is stored x-only, so its decoding is only known up to
    /// inversion; the check accepts the pairing equality or its inverse.
    /// Returns `false` for malformed encodings, never an error.
    pub fn check_sig(&self, pk: &PublicKey, params: &SchemeParams) -> bool {
        let mut hasher = match ElementHasher::new() {
            Ok(hasher) => hasher,
            Err(_) => return false,
        };
        let h_name = match hasher.hash_bytes_to_g1(&self.name) {
            Ok(point) => point,
            Err(_) => return false,
        };
        let name_sig = match g1_from_x_only_bytes(&self.name_sig) {
            Some(point) => point,
            None => return false,
        };
        let p0 = Bls12_381::pairing(name_sig, params.g());
        let p1 = Bls12_381::pairing(h_name, pk.spk());
        p0 == p1 || (p0 + p1).is_zero()
    }

    /// The encoded file name.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// The x-only encoded name signature.
    pub fn name_sig(&self) -> &[u8] {
        &self.name_sig
    }

    /// Number of authenticated chunks.
    pub fn chunk_count(&self) -> u32 {
        self.authenticators.len() as u32
    }

    /// The authenticator of chunk `index`.
    pub fn authenticator(&self, index: u32) -> Result<&G1, Error> {
        self.authenticators
            .get(index as usize)
            .ok_or(Error::ChunkIndexOutOfRange(index))
    }

    /// Split into `(name, name_sig, authenticators)`; the first two stay
    /// with the auditor, the last goes to the server.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, Vec<G1>) {
        (self.name, self.name_sig, self.authenticators)
    }

    /// Reassemble metadata from its transported parts.
    pub fn from_parts(name: Vec<u8>, name_sig: Vec<u8>, authenticators: Vec<G1>) -> Self {
        Self {
            name,
            name_sig,
            authenticators,
        }
    }
}
