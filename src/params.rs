// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use ark_bls12_381::G2Affine;
use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{UniformRand, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::{Error, Scalar, G2};

/// Public scheme parameters shared by every party of an audit round.
///
/// Holds the group generator `g` and the fixed byte lengths of the file-name
/// encoding and the x-only name-signature encoding. Immutable once
/// constructed; the parameters outlive any keys derived from them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SchemeParams {
    g: G2,
    name_length: usize,
    sig_length: usize,
}

impl SchemeParams {
    /// Generate fresh parameters: a uniformly random generator `g` in G2.
    pub fn generate<R: RngCore + CryptoRng>(mut rng: R) -> Self {
        Self::from_generator(G2::rand(&mut rng))
    }

    /// Reconstruct parameters from the blob produced by [`to_bytes`].
    ///
    /// Rejects blobs that fail to decode and blobs encoding the identity,
    /// which would make every derived key degenerate.
    ///
    /// [`to_bytes`]: SchemeParams::to_bytes
    pub fn from_bytes(blob: &[u8]) -> Result<Self, Error> {
        let g = G2Affine::deserialize_compressed(blob).map_err(|_| Error::MalformedParameters)?;
        if g.is_zero() {
            return Err(Error::MalformedParameters);
        }
        Ok(Self::from_generator(g.into()))
    }

    /// Serialize the parameters for distribution to the other parties.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        self.g
            .serialize_compressed(&mut blob)
            .expect("serializing into a Vec cannot fail");
        blob
    }

    fn from_generator(g: G2) -> Self {
        Self {
            g,
            name_length: Scalar::zero().compressed_size(),
            sig_length: ark_bls12_381::G1Affine::generator().compressed_size(),
        }
    }

    /// The group generator `g`.
    pub fn g(&self) -> G2 {
        self.g
    }

    /// Byte length of an encoded file name (one scalar-ring element).
    pub fn name_len(&self) -> usize {
        self.name_length
    }

    /// Byte length of the x-only name-signature encoding.
    pub fn sig_len(&self) -> usize {
        self.sig_length
    }
}
