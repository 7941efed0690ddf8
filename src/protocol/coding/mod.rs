/// A reproducible stream of 32-bit draws.
///
/// Encoder and decoder must agree on every draw bit-for-bit, so implementations
/// are expected to be pure fixed-width arithmetic over their state.
pub trait RandGen {
    /// State the next draw will advance from. Does not mutate.
    fn current(&self) -> u32;
    /// Advance the state and return it.
    fn draw(&mut self) -> u32;
}

mod lt_code;
mod planner;
mod random;
pub mod soliton;
mod source;

pub use lt_code::{BlockEncoder, xor_into};
pub use planner::{BlockPlanner, Plan, plan_for_seed};
pub use random::LinearGen;
pub use source::SourceStore;
