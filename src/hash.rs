// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use ark_bls12_381::g1;
use ark_ec::hashing::{
    curve_maps::wb::WBMap, map_to_curve_hasher::MapToCurveBasedHasher, HashToCurve,
};
use ark_ff::field_hashers::DefaultFieldHasher;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};

use crate::{Error, Scalar, G1};

/// Domain separation tag for hashing into G1.
const HASH_TO_G1_DOMAIN: &[u8] = b"PBPDP-V01-BLS12381G1_XMD:SHA-256_SSWU_RO_";

type G1Mapper = MapToCurveBasedHasher<G1, DefaultFieldHasher<Sha256>, WBMap<g1::Config>>;

/// Hashes byte strings into group elements and group elements into scalars.
///
/// Owns its digest state, hash-to-curve mapper, and a growable encoding
/// buffer, all reused across calls. Safe to use from sequential operations;
/// concurrent callers construct their own instances.
pub(crate) struct ElementHasher {
    digest: Sha256,
    mapper: G1Mapper,
    elem_buf: Vec<u8>,
}

impl ElementHasher {
    pub(crate) fn new() -> Result<Self, Error> {
        let mapper = G1Mapper::new(HASH_TO_G1_DOMAIN).map_err(|_| Error::HashToCurve)?;
        Ok(Self {
            digest: Sha256::new(),
            mapper,
            elem_buf: Vec::new(),
        })
    }

    /// SHA-256 the message, then map the digest onto the curve.
    pub(crate) fn hash_bytes_to_g1(&mut self, data: &[u8]) -> Result<G1, Error> {
        Digest::update(&mut self.digest, data);
        self.map_digest()
    }

    /// Hash the per-chunk tag `name || index_le` into G1.
    ///
    /// The index is appended as exactly four little-endian bytes, so tags for
    /// distinct indices never collide under the same name.
    pub(crate) fn hash_chunk_tag(&mut self, name: &[u8], index: u32) -> Result<G1, Error> {
        Digest::update(&mut self.digest, name);
        Digest::update(&mut self.digest, index.to_le_bytes());
        self.map_digest()
    }

    /// Canonically encode a group element, then hash the encoding into the
    /// scalar field.
    pub(crate) fn hash_element_to_scalar<T: CanonicalSerialize>(
        &mut self,
        element: &T,
    ) -> Scalar {
        self.elem_buf.clear();
        element
            .serialize_compressed(&mut self.elem_buf)
            .expect("serializing into a Vec cannot fail");
        Digest::update(&mut self.digest, &self.elem_buf);
        let digest = self.digest.finalize_reset();
        Scalar::from_le_bytes_mod_order(digest.as_slice())
    }

    fn map_digest(&mut self) -> Result<G1, Error> {
        let digest = self.digest.finalize_reset();
        let point = self
            .mapper
            .hash(digest.as_slice())
            .map_err(|_| Error::HashToCurve)?;
        Ok(point.into())
    }
}
