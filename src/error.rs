use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LtError {
    #[error("failed to read input: {0}")]
    InputRead(#[from] io::Error),

    #[error("input ended after {actual} of {expected} declared bytes")]
    ShortRead { expected: u64, actual: u64 },

    #[error("source block is {actual} bytes, accumulator is {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

pub type Result<T> = std::result::Result<T, LtError>;
