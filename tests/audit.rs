//! End-to-end audit rounds over in-memory files.

use ark_ff::PrimeField;
use ark_std::Zero;
use rand::{thread_rng, RngCore};
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

use pbpdp::{
    key_gen, key_gen_with_params, CancelToken, Challenge, ChallengePair, ChunkedSource, Error,
    MemorySource, PublicKey, ResponseProof, Scalar, SchemeParams, SecretKey,
    VerificationMetadata,
};

fn random_file(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    thread_rng().fill_bytes(&mut data);
    data
}

/// A challenge covering exactly the given indices, with weights borrowed
/// from a freshly generated challenge.
fn challenge_over(indices: &[u32], chunk_count: u32) -> Challenge {
    let base = Challenge::generate(thread_rng(), indices.len() as u32, chunk_count).unwrap();
    let pairs = indices
        .iter()
        .zip(base.pairs())
        .map(|(&index, pair)| ChallengePair {
            index,
            weight: pair.weight,
        })
        .collect();
    Challenge::from_pairs(pairs)
}

#[test]
fn tiny_roundtrip() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32), params.name_len()).unwrap();
    assert_eq!(file.chunk_count(), 1);

    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
    assert!(metadata.check_sig(&pk, &params));

    let challenge = Challenge::generate(&mut rng, file.chunk_count(), file.chunk_count()).unwrap();
    let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file).unwrap();
    assert!(proof.verify(&challenge, &metadata, &pk, &params));
}

#[test]
fn typical_audit() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32_000), params.name_len()).unwrap();
    let n = file.chunk_count();
    assert_eq!(n, 1_000);

    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
    assert!(metadata.check_sig(&pk, &params));
    assert_eq!(metadata.chunk_count(), n);

    let challenge = Challenge::generate(&mut rng, n * 4 / 5, n).unwrap();
    let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file).unwrap();
    assert!(proof.verify(&challenge, &metadata, &pk, &params));
}

#[test]
fn corrupt_authenticator_is_detected_exactly_where_sampled() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32 * 40), params.name_len()).unwrap();
    let n = file.chunk_count();

    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
    let (name, name_sig, mut authenticators) = metadata.into_parts();
    authenticators[0] = authenticators[0] + authenticators[0];
    let corrupted = VerificationMetadata::from_parts(name, name_sig, authenticators);

    // Any challenge sampling chunk 0 must reject.
    let hit = challenge_over(&[0, 3, 7, 11], n);
    let proof = ResponseProof::generate(&mut rng, &hit, &corrupted, &pk, &file).unwrap();
    assert!(!proof.verify(&hit, &corrupted, &pk, &params));

    // A challenge avoiding chunk 0 is unaffected.
    let miss = challenge_over(&[1, 3, 7, 11], n);
    let proof = ResponseProof::generate(&mut rng, &miss, &corrupted, &pk, &file).unwrap();
    assert!(proof.verify(&miss, &corrupted, &pk, &params));
}

#[test]
fn corrupt_chunk_is_detected_exactly_where_sampled() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let chunk_size = params.name_len();
    let data = random_file(chunk_size * 20);
    let file = MemorySource::new(data.clone(), chunk_size).unwrap();
    let n = file.chunk_count();

    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();

    // The server "loses" a byte of chunk 5 after signing.
    let mut lost = data;
    lost[5 * chunk_size] ^= 0x01;
    let degraded = MemorySource::new(lost, chunk_size).unwrap();

    let hit = challenge_over(&[2, 5, 9], n);
    let proof = ResponseProof::generate(&mut rng, &hit, &metadata, &pk, &degraded).unwrap();
    assert!(!proof.verify(&hit, &metadata, &pk, &params));

    let miss = challenge_over(&[2, 6, 9], n);
    let proof = ResponseProof::generate(&mut rng, &miss, &metadata, &pk, &degraded).unwrap();
    assert!(proof.verify(&miss, &metadata, &pk, &params));
}

#[test]
fn empty_challenge_yields_a_blinding_only_proof() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32_000), params.name_len()).unwrap();
    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();

    let challenge = Challenge::generate(&mut rng, 0, file.chunk_count()).unwrap();
    assert!(challenge.is_empty());

    let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file).unwrap();
    // With nothing sampled the proof degenerates to sigma = 1, mu = r and
    // R = e(u,v)^r.
    assert!(proof.aggregate().is_zero());
    let mu_scalar = Scalar::from_le_bytes_mod_order(&proof.mu().to_bytes_le());
    assert_eq!(proof.commitment(), pk.euv() * mu_scalar);
    assert!(proof.verify(&challenge, &metadata, &pk, &params));
}

#[test]
fn metadata_does_not_verify_under_a_foreign_key() {
    let mut rng = thread_rng();
    let data = random_file(320);

    let (params_a, _sk_a, pk_a) = key_gen(&mut rng);
    let (params_b, sk_b, pk_b) = key_gen(&mut rng);
    let file = MemorySource::new(data, params_b.name_len()).unwrap();
    let metadata_b = VerificationMetadata::generate(&mut rng, &sk_b, &pk_b, &params_b, &file).unwrap();

    assert!(metadata_b.check_sig(&pk_b, &params_b));
    assert!(!metadata_b.check_sig(&pk_a, &params_a));
}

#[test]
fn forged_name_sig_is_rejected() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(320), params.name_len()).unwrap();
    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();

    let (name, mut name_sig, authenticators) = metadata.into_parts();
    name_sig[0] ^= 0x01;
    name_sig[17] ^= 0x80;
    let forged = VerificationMetadata::from_parts(name, name_sig, authenticators);
    assert!(!forged.check_sig(&pk, &params));
}

#[test]
fn seeded_rng_reproduces_the_whole_round() {
    let data = random_file(32 * 8);
    let seed = 0x5EED_CAFE;

    let run = |data: &[u8]| {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let (params, sk, pk) = key_gen(&mut rng);
        let file = MemorySource::new(data.to_vec(), params.name_len()).unwrap();
        let metadata =
            VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
        let challenge = Challenge::generate(&mut rng, 6, file.chunk_count()).unwrap();
        let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file).unwrap();
        (metadata, challenge, proof)
    };

    let (metadata_0, challenge_0, proof_0) = run(&data);
    let (metadata_1, challenge_1, proof_1) = run(&data);
    assert_eq!(metadata_0, metadata_1);
    assert_eq!(challenge_0, challenge_1);
    assert_eq!(proof_0, proof_1);
}

#[test]
fn verification_is_deterministic() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32 * 4), params.name_len()).unwrap();
    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
    let challenge = Challenge::generate(&mut rng, 3, file.chunk_count()).unwrap();
    let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file).unwrap();

    let first = proof.verify(&challenge, &metadata, &pk, &params);
    let second = proof.verify(&challenge, &metadata, &pk, &params);
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn reused_parameter_blob_supports_a_full_round() {
    let mut rng = thread_rng();
    let (params, _, _) = key_gen(&mut rng);
    let blob = params.to_bytes();

    let (params, sk, pk) = key_gen_with_params(&mut rng, &blob).unwrap();
    let file = MemorySource::new(random_file(32 * 4), params.name_len()).unwrap();
    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
    assert!(metadata.check_sig(&pk, &params));

    let challenge = Challenge::generate(&mut rng, 4, file.chunk_count()).unwrap();
    let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &file).unwrap();
    assert!(proof.verify(&challenge, &metadata, &pk, &params));

    assert_eq!(
        key_gen_with_params(&mut rng, b"not a parameter blob").unwrap_err(),
        Error::MalformedParameters
    );
}

#[test]
fn empty_file_cannot_be_signed() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let empty = MemorySource::new(Vec::new(), params.name_len()).unwrap();
    assert_eq!(
        VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &empty).unwrap_err(),
        Error::EmptyFile
    );
}

#[test]
fn challenge_index_out_of_range_fails_proof_generation() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32 * 4), params.name_len()).unwrap();
    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();

    let out_of_range = challenge_over(&[99], file.chunk_count());
    assert_eq!(
        ResponseProof::generate(&mut rng, &out_of_range, &metadata, &pk, &file).unwrap_err(),
        Error::ChunkIndexOutOfRange(99)
    );
}

#[test]
fn cancellation_aborts_signing_and_proving() {
    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let file = MemorySource::new(random_file(32 * 4), params.name_len()).unwrap();

    let cancelled = CancelToken::new();
    cancelled.cancel();
    assert_eq!(
        VerificationMetadata::generate_cancellable(
            &mut rng, &sk, &pk, &params, &file, &cancelled
        )
        .unwrap_err(),
        Error::Cancelled
    );

    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &file).unwrap();
    let challenge = Challenge::generate(&mut rng, 2, file.chunk_count()).unwrap();
    assert_eq!(
        ResponseProof::generate_cancellable(
            &mut rng, &challenge, &metadata, &pk, &file, &cancelled
        )
        .unwrap_err(),
        Error::Cancelled
    );
}

#[test]
fn scalar_and_integer_readers_produce_interchangeable_rounds() {
    // A source that hands out chunks only through the integer reader, with
    // the scalar reader derived by reduction.
    struct IntegerBacked(MemorySource);

    impl ChunkedSource for IntegerBacked {
        fn chunk_count(&self) -> u32 {
            self.0.chunk_count()
        }
        fn chunk_scalar(&self, index: u32) -> Result<Scalar, Error> {
            let chunk = self.0.chunk_integer(index)?;
            Ok(Scalar::from_le_bytes_mod_order(&chunk.to_bytes_le()))
        }
        fn chunk_integer(&self, index: u32) -> Result<pbpdp::BigUint, Error> {
            self.0.chunk_integer(index)
        }
    }

    let mut rng = thread_rng();
    let (params, sk, pk) = key_gen(&mut rng);
    let data = random_file(32 * 6);
    let direct = MemorySource::new(data.clone(), params.name_len()).unwrap();
    let derived = IntegerBacked(MemorySource::new(data, params.name_len()).unwrap());

    // Signing through either reader produces metadata the other verifies
    // against.
    let metadata = VerificationMetadata::generate(&mut rng, &sk, &pk, &params, &derived).unwrap();
    let challenge = Challenge::generate(&mut rng, 4, direct.chunk_count()).unwrap();
    let proof = ResponseProof::generate(&mut rng, &challenge, &metadata, &pk, &direct).unwrap();
    assert!(proof.verify(&challenge, &metadata, &pk, &params));
}

// Keep the key types nameable from test code; a compile-time check that the
// public surface stays `Send + Sync` for cross-thread audit rounds.
#[test]
fn round_state_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SchemeParams>();
    assert_send_sync::<SecretKey>();
    assert_send_sync::<PublicKey>();
    assert_send_sync::<VerificationMetadata>();
    assert_send_sync::<Challenge>();
    assert_send_sync::<ResponseProof>();
    assert_send_sync::<CancelToken>();
}
