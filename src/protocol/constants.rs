/// fileSize + blockSize + seed, each a big-endian u32.
pub const BLOCK_HEADER_LENGTH: usize = 12;

// Numerical Recipes LCG. A - 1 is divisible by 4 and C is odd: full 2^32 period.
pub const LCG_MULTIPLIER: u32 = 1_664_525;
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// 2^32, used to map a draw onto [0, 1).
pub const DRAW_RANGE: f64 = 4_294_967_296.0;
