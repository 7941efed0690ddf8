use super::RandGen;
use crate::protocol::constants::{LCG_INCREMENT, LCG_MULTIPLIER};

/// Full-period linear congruential generator over `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearGen {
    seed: u32,
}

impl LinearGen {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }
}

impl RandGen for LinearGen {
    fn current(&self) -> u32 {
        self.seed
    }

    fn draw(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.seed
    }
}
