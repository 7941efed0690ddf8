pub const DEFAULT_BLOCK_SIZE: u32 = 1024;
pub const WRITE_BUFFER_SIZE: usize = 64 * 1024;
pub const DEFAULT_LOG_LEVEL: &str = "info";
