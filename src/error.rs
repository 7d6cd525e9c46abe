// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use thiserror::Error;

/// An error raised by the auditing scheme.
///
/// A cryptographically rejected proof or name-signature is *not* an error:
/// the verifier predicates return `false` for those.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// Scheme-parameter generation failed or a supplied parameter blob was
    /// malformed.
    #[error("malformed scheme parameters")]
    MalformedParameters,
    /// The chunked source reports no chunks where a non-empty file is
    /// required.
    #[error("file has no chunks")]
    EmptyFile,
    /// A chunk index exceeded the chunk count of the source or metadata.
    #[error("chunk index {0} out of range")]
    ChunkIndexOutOfRange(u32),
    /// A chunked source was configured with a zero chunk size.
    #[error("chunk size must be non-zero")]
    ZeroChunkSize,
    /// The chunked source failed to produce a chunk it claims to hold.
    #[error("chunked source read failure")]
    Source,
    /// Storage for the per-chunk authenticator array could not be reserved.
    #[error("authenticator storage allocation failed")]
    Allocation,
    /// The hash-to-curve mapper could not be constructed or failed to map.
    #[error("hashing into the curve group failed")]
    HashToCurve,
    /// The operation was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("operation cancelled")]
    Cancelled,
}
