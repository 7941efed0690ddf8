pub mod coding;
pub mod constants;
pub mod wire;
