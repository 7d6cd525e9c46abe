// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use ark_std::UniformRand;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::Scalar;

/// The data owner's secret key.
///
/// Two independent scalars: `ssk` signs the file name (the BLS part of the
/// scheme) and `x` authenticates chunks. The key never leaves the owner and
/// is wiped from memory on drop.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    ssk: Scalar,
    x: Scalar,
}

impl SecretKey {
    /// Sample a fresh secret key.
    pub fn new<R: RngCore + CryptoRng>(mut rng: R) -> Self {
        Self {
            ssk: Scalar::rand(&mut rng),
            x: Scalar::rand(&mut rng),
        }
    }

    pub(crate) fn ssk(&self) -> Scalar {
        self.ssk
    }

    pub(crate) fn x(&self) -> Scalar {
        self.x
    }
}
