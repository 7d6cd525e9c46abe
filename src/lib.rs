// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

#![deny(missing_docs)]

//! Privacy-preserving public auditing for outsourced storage.
//!
//! A data owner uploads a file to an untrusted server, keeps only
//! constant-size metadata, and later (possibly through a public third-party
//! auditor) spot-checks random chunks. The server answers with a short
//! aggregate proof `(R, sigma, mu)` that simultaneously attests to
//! possession of every sampled chunk and blinds chunk contents from the
//! auditor. Verification reduces to one pairing identity over BLS12-381.
//!
//! A full audit round:
//!
//! 1. **Setup** — [`key_gen`] produces [`SchemeParams`], [`SecretKey`] and
//!    [`PublicKey`].
//! 2. **Sign** — [`VerificationMetadata::generate`] tags every chunk of a
//!    [`ChunkedSource`] with an authenticator; the server stores the
//!    authenticators, the auditor keeps the file name and its signature.
//! 3. **Check** — [`VerificationMetadata::check_sig`] binds the file name to
//!    the owner's key.
//! 4. **Challenge** — [`Challenge::generate`] samples random (index, weight)
//!    pairs.
//! 5. **Prove** — [`ResponseProof::generate`] aggregates the sampled chunks
//!    and authenticators.
//! 6. **Verify** — [`ResponseProof::verify`] checks the pairing identity
//!    using public data only.
//!
//! # Example
//!
//! ```
//! use pbpdp::{key_gen, Challenge, ChunkedSource, MemorySource, ResponseProof, VerificationMetadata};
//!
//! # fn main() -> Result<(), pbpdp::Error> {
//! let mut rng = rand::thread_rng();
//!
//! // Data owner: generate keys and per-chunk authenticators.
//! let (params, sk, pk) = key_gen(&mut rng);
//! let file = MemorySource::new(vec![7u8; 4096], params.name_len())?;
//! let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file)?;
//!
//! // Auditor: check the file tag, then run a spot check.
//! assert!(metadata.check_sig(&pk, &params));
//! let challenge = Challenge::generate(&mut rng, 16, file.chunk_count())?;
//!
//! // Server: answer with a constant-size proof.
//! let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file)?;
//!
//! // Auditor: verify without ever seeing the file.
//! assert!(proof.verify(&challenge, &metadata, &pk, &params));
//! # Ok(())
//! # }
//! ```

mod cancel;
mod challenge;
mod error;
mod hash;
mod metadata;
mod params;
mod proof;
mod public_key;
mod secret_key;
mod source;

/// An element of the BLS12-381 scalar field, the scalar ring of the scheme.
pub type Scalar = ark_bls12_381::Fr;

/// An element of the first pairing group; authenticators and the aggregate
/// `sigma` live here.
pub type G1 = ark_bls12_381::G1Projective;

/// An element of the second pairing group; the generator `g` and the derived
/// keys `spk`, `v` live here.
pub type G2 = ark_bls12_381::G2Projective;

/// An element of the pairing target group, written additively by arkworks.
pub type Gt = ark_ec::pairing::PairingOutput<ark_bls12_381::Bls12_381>;

pub use num_bigint::BigUint;

pub use cancel::CancelToken;
pub use challenge::{Challenge, ChallengePair};
pub use error::Error;
pub use metadata::VerificationMetadata;
pub use params::SchemeParams;
pub use proof::ResponseProof;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;
pub use source::{ChunkedSource, MemorySource};

use rand_core::{CryptoRng, RngCore};

/// Run the full key-generation step: fresh scheme parameters, a secret key,
/// and the public key derived from both.
///
/// Parameter generation, key sampling, and key derivation either all succeed
/// or nothing is returned; there is no observable partial state.
pub fn key_gen<R: RngCore + CryptoRng>(mut rng: R) -> (SchemeParams, SecretKey, PublicKey) {
    let params = SchemeParams::generate(&mut rng);
    let sk = SecretKey::new(&mut rng);
    let pk = PublicKey::derive(&mut rng, &params, &sk);
    (params, sk, pk)
}

/// Like [`key_gen`], but reuses scheme parameters from a serialized blob
/// instead of generating fresh ones.
pub fn key_gen_with_params<R: RngCore + CryptoRng>(
    mut rng: R,
    blob: &[u8],
) -> Result<(SchemeParams, SecretKey, PublicKey), Error> {
    let params = SchemeParams::from_bytes(blob)?;
    let sk = SecretKey::new(&mut rng);
    let pk = PublicKey::derive(&mut rng, &params, &sk);
    Ok((params, sk, pk))
}
