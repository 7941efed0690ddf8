pub mod file;
pub mod logger;
pub mod manifest;

pub fn generate_random(size: usize) -> Vec<u8> {
    use rand::Rng;
    let mut data: Vec<u8> = vec![0; size];
    rand::rng().fill(data.as_mut_slice());
    data
}

/// Starting seed for a session with none given on the command line.
pub fn fresh_seed() -> u32 {
    rand::random()
}
