// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use ark_bls12_381::Bls12_381;
use ark_ec::pairing::Pairing;
use ark_std::UniformRand;
use rand_core::{CryptoRng, RngCore};

use crate::{SchemeParams, SecretKey, Gt, G1, G2};

/// The publicly distributable key material of one audit setup.
///
/// `spk = g^ssk` verifies the name signature, `u` is the random chunk base,
/// `v = g^x` closes the authenticator pairing identity, and `euv = e(u, v)`
/// is cached so the prover's blinding commitment costs one GT exponentiation
/// instead of a pairing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    spk: G2,
    u: G1,
    v: G2,
    euv: Gt,
}

impl PublicKey {
    /// Derive the public key for `sk` under `params`, sampling the chunk
    /// base `u` uniformly at random.
    pub fn derive<R: RngCore + CryptoRng>(
        mut rng: R,
        params: &SchemeParams,
        sk: &SecretKey,
    ) -> Self {
        let spk = params.g() * sk.ssk();
        let u = G1::rand(&mut rng);
        let v = params.g() * sk.x();
        let euv = Bls12_381::pairing(u, v);
        Self { spk, u, v, euv }
    }

    /// The name-signature verification key `g^ssk`.
    pub fn spk(&self) -> G2 {
        self.spk
    }

    /// The chunk base `u`.
    pub fn u(&self) -> G1 {
        self.u
    }

    /// The authenticator verification key `g^x`.
    pub fn v(&self) -> G2 {
        self.v
    }

    /// The cached pairing `e(u, v)`.
    pub fn euv(&self) -> Gt {
        self.euv
    }
}
