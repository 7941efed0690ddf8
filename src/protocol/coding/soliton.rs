use crate::protocol::constants::DRAW_RANGE;

/// Ideal Soliton: `P(1) = 1/k`, `P(d) = 1/(d(d-1))`. Inverts the CDF at `draw / 2^32`.
pub fn degree(draw: u32, k: u32) -> u32 {
    // k = 0 never reaches here through a planner; treat it like a single block.
    if k <= 1 {
        return 1;
    }

    let fraction = draw as f64 / DRAW_RANGE;
    let mut cumulative = 1.0 / k as f64;
    if cumulative > fraction {
        return 1;
    }

    for d in 2..=k {
        cumulative += 1.0 / (d as u64 * (d as u64 - 1)) as f64;
        if cumulative > fraction {
            return d;
        }
    }

    // Rounding can leave the last cumulative value a hair under the fraction.
    k
}

pub fn probability(d: u32, k: u32) -> f64 {
    match d {
        0 => 0.0,
        1 => 1.0 / k as f64,
        d if d > k => 0.0,
        d => 1.0 / (d as u64 * (d as u64 - 1)) as f64,
    }
}
