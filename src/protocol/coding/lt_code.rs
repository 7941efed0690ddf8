use std::io::Read;

use bytes::BytesMut;
use log::{debug, info};

use super::{BlockPlanner, LinearGen, RandGen, SourceStore};
use crate::error::{LtError, Result};
use crate::protocol::wire::CodedBlock;

/// XOR `block` into `accum` in place.
pub fn xor_into(accum: &mut [u8], block: &[u8]) -> Result<()> {
    if accum.len() != block.len() {
        return Err(LtError::LengthMismatch {
            expected: accum.len(),
            actual: block.len(),
        });
    }
    accum.iter_mut().zip(block).for_each(|(a, b)| *a ^= b);
    Ok(())
}

/// Rateless: every call yields one more coded block, forever.
#[derive(Debug)]
pub struct BlockEncoder<G: RandGen = LinearGen> {
    source: SourceStore,
    planner: BlockPlanner<G>,
}

impl BlockEncoder<LinearGen> {
    pub fn new<R: Read>(reader: R, size: u64, data_block_size: u32, seed: u32) -> Result<Self> {
        let source = SourceStore::from_reader(reader, size, data_block_size)?;
        Ok(Self::from_store(source, seed))
    }

    pub fn from_store(source: SourceStore, seed: u32) -> Self {
        info!(
            "LT encoder: {} bytes in {} blocks of {} bytes, starting seed {}",
            source.file_size(),
            source.block_count(),
            source.data_size(),
            seed
        );
        let planner =
            BlockPlanner::with_generator(source.block_count_nonzero(), LinearGen::new(seed));
        Self { source, planner }
    }
}

impl<G: RandGen> BlockEncoder<G> {
    pub fn source(&self) -> &SourceStore {
        &self.source
    }

    pub fn current_seed(&self) -> u32 {
        self.planner.current_seed()
    }

    pub fn next_block(&mut self) -> Result<CodedBlock> {
        let plan = self.planner.plan();
        let mut accum = BytesMut::zeroed(self.source.data_size() as usize);
        for &index in plan.indices.iter() {
            xor_into(&mut accum, self.source.fetch(index))?;
        }
        debug!("block seed {} degree {}", plan.seed, plan.degree);
        Ok(CodedBlock::new(
            self.source.file_size(),
            plan.seed,
            accum.freeze(),
        ))
    }
}

/// Never ends on its own; callers decide how many blocks to take.
impl<G: RandGen> Iterator for BlockEncoder<G> {
    type Item = Result<CodedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_block())
    }
}
