pub mod constants;
pub mod error;
pub mod protocol;
pub mod util;

pub use error::{LtError, Result};
pub use protocol::coding::{BlockEncoder, BlockPlanner, LinearGen, Plan, RandGen, SourceStore};
pub use protocol::wire::{CodedBlock, ParseError};
