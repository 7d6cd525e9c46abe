// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::{Error, Scalar};

/// A file presented as a sequence of fixed-size chunks.
///
/// How bytes become chunks is the implementor's concern; the scheme only
/// requires that repeated reads of the same index yield the same value, and
/// that the two readers agree: `chunk_scalar(i)` must equal
/// `chunk_integer(i)` reduced into the scalar field.
///
/// The dual readers exist so the signer can work in the scalar field while
/// the prover accumulates unreduced integers; an implementation backed by a
/// single representation can derive one reader from the other.
pub trait ChunkedSource {
    /// Total number of chunks in the file.
    fn chunk_count(&self) -> u32;

    /// Chunk `i` as a scalar-ring element.
    fn chunk_scalar(&self, index: u32) -> Result<Scalar, Error>;

    /// Chunk `i` as an unbounded non-negative integer.
    fn chunk_integer(&self, index: u32) -> Result<BigUint, Error>;
}

/// A [`ChunkedSource`] over an in-memory byte buffer.
///
/// Chunk values are the little-endian interpretation of each `chunk_size`
/// byte window; the final partial chunk is implicitly zero-padded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemorySource {
    data: Vec<u8>,
    chunk_size: usize,
}

impl MemorySource {
    /// Wrap `data` as a chunked file with the given chunk size in bytes.
    pub fn new(data: Vec<u8>, chunk_size: usize) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::ZeroChunkSize);
        }
        Ok(Self { data, chunk_size })
    }

    fn chunk_bytes(&self, index: u32) -> Result<&[u8], Error> {
        let start = index as usize * self.chunk_size;
        if start >= self.data.len() {
            return Err(Error::ChunkIndexOutOfRange(index));
        }
        let end = usize::min(start + self.chunk_size, self.data.len());
        Ok(&self.data[start..end])
    }
}

impl ChunkedSource for MemorySource {
    fn chunk_count(&self) -> u32 {
        let size = self.data.len();
        let mut count = size / self.chunk_size;
        if size % self.chunk_size > 0 {
            count += 1;
        }
        count as u32
    }

    fn chunk_scalar(&self, index: u32) -> Result<Scalar, Error> {
        Ok(Scalar::from_le_bytes_mod_order(self.chunk_bytes(index)?))
    }

    fn chunk_integer(&self, index: u32) -> Result<BigUint, Error> {
        Ok(BigUint::from_bytes_le(self.chunk_bytes(index)?))
    }
}
