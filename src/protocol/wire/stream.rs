use std::io::{ErrorKind, Read};

use bytes::Bytes;
use zerocopy::FromBytes;

use super::{CodedBlock, CodedBlockHeader, ParseError, checked_block_size};
use crate::protocol::constants::BLOCK_HEADER_LENGTH;

// Headers are untrusted; buffers grow with bytes actually read past this.
const PAYLOAD_PREALLOC: usize = 64 * 1024;

pub struct BlockStreamReader<R> {
    inner: R,
    done: bool,
}

impl<R: Read> BlockStreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, done: false }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_block(&mut self) -> Result<Option<CodedBlock>, ParseError> {
        let mut header_buf = [0u8; BLOCK_HEADER_LENGTH];
        match fill(&mut self.inner, &mut header_buf)? {
            0 => return Ok(None),
            BLOCK_HEADER_LENGTH => (),
            short => return Err(ParseError::HeaderTooShort(short)),
        }
        let header = CodedBlockHeader::read_from_bytes(&header_buf)
            .map_err(|_| ParseError::HeaderTooShort(BLOCK_HEADER_LENGTH))?;
        let block_size = checked_block_size(&header)?;

        let mut payload = Vec::with_capacity(block_size.min(PAYLOAD_PREALLOC));
        (&mut self.inner)
            .take(block_size as u64)
            .read_to_end(&mut payload)?;
        if payload.len() < block_size {
            return Err(ParseError::PayloadTooShort {
                expected: block_size,
                actual: payload.len(),
            });
        }
        Ok(Some(CodedBlock::from_parts(&header, Bytes::from(payload))))
    }
}

impl<R: Read> Iterator for BlockStreamReader<R> {
    type Item = Result<CodedBlock, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.read_block().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ParseError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
