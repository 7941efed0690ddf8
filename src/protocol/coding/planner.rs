use std::collections::HashSet;
use std::num::NonZeroU32;

use log::trace;

use super::{LinearGen, RandGen, soliton};
use crate::error::{LtError, Result};

/// Which source blocks one coded block combines, and the seed that replays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub seed: u32,
    pub degree: u32,
    pub indices: Vec<u32>,
}

fn non_zero(block_count: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(block_count)
        .ok_or(LtError::InvalidConfiguration("block count must be non-zero"))
}

/// The plan's seed is the generator state before the degree draw.
fn draw_plan<G: RandGen>(rando: &mut G, block_count: NonZeroU32) -> Plan {
    let seed = rando.current();
    let degree = soliton::degree(rando.draw(), block_count.get());
    let mut indices = Vec::with_capacity(degree as usize);
    let mut seen = HashSet::with_capacity(degree as usize);

    while indices.len() < degree as usize {
        let candidate = rando.draw() % block_count;
        if !seen.insert(candidate) {
            trace!("seed {seed}: discarding duplicate index {candidate}");
            continue;
        }
        indices.push(candidate);
    }

    Plan {
        seed,
        degree,
        indices,
    }
}

/// Replay the plan a block stamped with `seed` was built from.
pub fn plan_for_seed(seed: u32, block_count: u32) -> Result<Plan> {
    Ok(draw_plan(&mut LinearGen::new(seed), non_zero(block_count)?))
}

/// Session-long planner. Its generator is never reset between plans.
#[derive(Debug)]
pub struct BlockPlanner<G: RandGen = LinearGen> {
    block_count: NonZeroU32,
    rando: G,
}

impl BlockPlanner<LinearGen> {
    pub fn new(block_count: u32, seed: u32) -> Result<Self> {
        Ok(Self::with_generator(non_zero(block_count)?, LinearGen::new(seed)))
    }
}

impl<G: RandGen> BlockPlanner<G> {
    pub fn with_generator(block_count: NonZeroU32, rando: G) -> Self {
        Self { block_count, rando }
    }

    /// Seed the next plan will carry.
    pub fn current_seed(&self) -> u32 {
        self.rando.current()
    }

    pub fn block_count(&self) -> u32 {
        self.block_count.get()
    }

    pub fn plan(&mut self) -> Plan {
        draw_plan(&mut self.rando, self.block_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seed_42_three_blocks() {
        let mut planner = BlockPlanner::new(3, 42).unwrap();
        let expected = [
            (42, vec![1]),
            (378494188, vec![0, 1]),
            (110225632, vec![1, 2]),
            (3753001289, vec![1, 2, 0]),
            (260725464, vec![2]),
        ];
        for (seed, indices) in expected {
            let plan = planner.plan();
            assert_eq!(plan.seed, seed);
            assert_eq!(plan.degree as usize, indices.len());
            assert_eq!(plan.indices, indices);
        }
    }

    #[test]
    fn indices_are_distinct_and_match_degree() {
        for block_count in [1, 2, 3, 17, 256] {
            let mut planner = BlockPlanner::new(block_count, 0xC0FFEE).unwrap();
            for _ in 0..2000 {
                let plan = planner.plan();
                assert!(plan.degree >= 1 && plan.degree <= block_count);
                assert_eq!(plan.indices.len(), plan.degree as usize);
                let unique: HashSet<_> = plan.indices.iter().collect();
                assert_eq!(unique.len(), plan.indices.len());
                assert!(plan.indices.iter().all(|&i| i < block_count));
            }
        }
    }

    #[test]
    fn replay_matches_session() {
        let block_count = 97;
        let mut planner = BlockPlanner::new(block_count, 20240601).unwrap();
        for _ in 0..1000 {
            let plan = planner.plan();
            assert_eq!(plan_for_seed(plan.seed, block_count).unwrap(), plan);
        }
    }

    #[test]
    fn seed_is_captured_before_drawing() {
        let mut planner = BlockPlanner::new(8, 1234).unwrap();
        assert_eq!(planner.current_seed(), 1234);
        let first = planner.plan();
        assert_eq!(first.seed, 1234);
        let next_seed = planner.current_seed();
        assert_ne!(next_seed, 1234);
        assert_eq!(planner.plan().seed, next_seed);
    }

    #[test]
    fn generator_is_not_reset_between_plans() {
        let mut planner = BlockPlanner::new(5, 99).unwrap();
        let seeds: Vec<u32> = (0..50).map(|_| planner.plan().seed).collect();
        let unique: HashSet<_> = seeds.iter().collect();
        assert_eq!(unique.len(), seeds.len());
    }

    #[test]
    fn single_block_source() {
        let mut planner = BlockPlanner::new(1, 7).unwrap();
        for _ in 0..100 {
            assert_eq!(planner.plan().indices, vec![0]);
        }
    }

    #[test]
    fn zero_blocks_rejected() {
        assert!(matches!(
            BlockPlanner::new(0, 42),
            Err(LtError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            plan_for_seed(42, 0),
            Err(LtError::InvalidConfiguration(_))
        ));
    }

    /// First draw is `u32::MAX`, which forces the largest degree.
    struct MaxDegreeFirst {
        inner: LinearGen,
        fired: bool,
    }

    impl RandGen for MaxDegreeFirst {
        fn current(&self) -> u32 {
            self.inner.current()
        }

        fn draw(&mut self) -> u32 {
            if !self.fired {
                self.fired = true;
                return u32::MAX;
            }
            self.inner.draw()
        }
    }

    #[test]
    fn full_degree_plan_covers_every_block() {
        let block_count = NonZeroU32::new(5000).unwrap();
        let rando = MaxDegreeFirst {
            inner: LinearGen::new(17),
            fired: false,
        };
        let plan = BlockPlanner::with_generator(block_count, rando).plan();
        assert_eq!(plan.degree, 5000);
        let mut sorted = plan.indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..5000).collect::<Vec<u32>>());
    }

    #[test]
    fn index_order_follows_draw_order() {
        let block_count = 300;
        for seed in [1, 42, 0xFEED, u32::MAX] {
            let mut rando = LinearGen::new(seed);
            let degree = soliton::degree(rando.draw(), block_count);
            let mut expected: Vec<u32> = Vec::new();
            while expected.len() < degree as usize {
                let candidate = rando.draw() % block_count;
                if !expected.contains(&candidate) {
                    expected.push(candidate);
                }
            }
            assert_eq!(plan_for_seed(seed, block_count).unwrap().indices, expected);
        }
    }
}
