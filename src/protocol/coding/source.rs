use std::io::{ErrorKind, Read};
use std::num::NonZeroU32;

use crate::error::{LtError, Result};

/// Block-aligned, zero-padded copy of the whole input.
#[derive(Debug)]
pub struct SourceStore {
    data: Vec<u8>,
    file_size: u32,
    data_size: u32,
    block_count: NonZeroU32,
}

impl SourceStore {
    /// Read exactly `length` bytes from `reader`, then pad the tail block with zeros.
    pub fn from_reader<R: Read>(mut reader: R, length: u64, data_size: u32) -> Result<Self> {
        let (file_size, block_count, padded_len) = validate(length, data_size)?;

        let mut data = vec![0u8; padded_len];
        let mut filled = 0usize;
        while filled < file_size as usize {
            match reader.read(&mut data[filled..file_size as usize]) {
                Ok(0) => {
                    return Err(LtError::ShortRead {
                        expected: length,
                        actual: filled as u64,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self {
            data,
            file_size,
            data_size,
            block_count,
        })
    }

    pub fn from_bytes(bytes: &[u8], data_size: u32) -> Result<Self> {
        Self::from_reader(bytes, bytes.len() as u64, data_size)
    }

    /// Panics if `index >= block_count`.
    pub fn fetch(&self, index: u32) -> &[u8] {
        let start = index as usize * self.data_size as usize;
        &self.data[start..start + self.data_size as usize]
    }

    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    pub fn block_count(&self) -> u32 {
        self.block_count.get()
    }

    pub(crate) fn block_count_nonzero(&self) -> NonZeroU32 {
        self.block_count
    }

    pub fn padded(&self) -> &[u8] {
        &self.data
    }
}

/// Returns (file size, block count, padded length).
fn validate(length: u64, data_size: u32) -> Result<(u32, NonZeroU32, usize)> {
    if data_size == 0 {
        return Err(LtError::InvalidConfiguration("data block size must be non-zero"));
    }
    if length == 0 {
        return Err(LtError::InvalidConfiguration("input must not be empty"));
    }
    let file_size = u32::try_from(length)
        .map_err(|_| LtError::InvalidConfiguration("input larger than 4 GiB"))?;
    let block_count = NonZeroU32::new(file_size.div_ceil(data_size))
        .ok_or(LtError::InvalidConfiguration("input produces no blocks"))?;
    let padded_len = usize::try_from(u64::from(block_count.get()) * u64::from(data_size))
        .map_err(|_| LtError::InvalidConfiguration("padded input does not fit in memory"))?;
    Ok((file_size, block_count, padded_len))
}
