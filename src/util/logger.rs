use env_logger::{Builder, Env, Target};

use crate::constants::DEFAULT_LOG_LEVEL;

// stderr: stdout carries the block stream.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_LEVEL))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init();
}
