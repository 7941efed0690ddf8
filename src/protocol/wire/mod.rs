use std::io;

use bytes::{Bytes, BytesMut};
use thiserror::Error;
use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::protocol::constants::BLOCK_HEADER_LENGTH;

pub mod stream;

pub use stream::BlockStreamReader;

#[repr(C)]
#[derive(IntoBytes, FromBytes, Unaligned, Immutable, KnownLayout, Debug, Clone, Copy)]
pub struct CodedBlockHeader {
    pub file_size: U32<BigEndian>,
    pub block_size: U32<BigEndian>, // payload only, header excluded
    pub seed: U32<BigEndian>,
}

const _: () = assert!(std::mem::size_of::<CodedBlockHeader>() == BLOCK_HEADER_LENGTH);

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("block header needs 12 bytes, got {0}")]
    HeaderTooShort(usize),
    #[error("payload declares {expected} bytes, only {actual} available")]
    PayloadTooShort { expected: usize, actual: usize },
    #[error("block declares an empty payload")]
    ZeroBlockSize,
    #[error("block declares an empty source file")]
    ZeroFileSize,
    #[error("failed to read block stream: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedBlock {
    pub file_size: u32,
    pub seed: u32,
    pub payload: Bytes,
}

impl CodedBlock {
    pub fn new(file_size: u32, seed: u32, payload: Bytes) -> Self {
        Self {
            file_size,
            seed,
            payload,
        }
    }

    pub fn block_size(&self) -> u32 {
        self.payload.len() as u32
    }

    pub fn header(&self) -> CodedBlockHeader {
        CodedBlockHeader {
            file_size: self.file_size.into(),
            block_size: self.block_size().into(),
            seed: self.seed.into(),
        }
    }

    pub fn wire_len(&self) -> usize {
        BLOCK_HEADER_LENGTH + self.payload.len()
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        buf.extend_from_slice(self.header().as_bytes());
        buf.extend_from_slice(&self.payload);
        debug_assert_eq!(buf.len(), self.wire_len());
        buf.freeze()
    }

    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), ParseError> {
        let (header, rest) = CodedBlockHeader::read_from_prefix(data)
            .map_err(|_| ParseError::HeaderTooShort(data.len()))?;
        let block_size = checked_block_size(&header)?;
        if rest.len() < block_size {
            return Err(ParseError::PayloadTooShort {
                expected: block_size,
                actual: rest.len(),
            });
        }
        let (payload, rest) = rest.split_at(block_size);
        Ok((Self::from_parts(&header, Bytes::copy_from_slice(payload)), rest))
    }

    fn from_parts(header: &CodedBlockHeader, payload: Bytes) -> Self {
        Self::new(header.file_size.into(), header.seed.into(), payload)
    }
}

fn checked_block_size(header: &CodedBlockHeader) -> Result<usize, ParseError> {
    if u32::from(header.file_size) == 0 {
        return Err(ParseError::ZeroFileSize);
    }
    match u32::from(header.block_size) {
        0 => Err(ParseError::ZeroBlockSize),
        size => Ok(size as usize),
    }
}
