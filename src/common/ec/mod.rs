mod galois;

pub(crate) use galois::*;

// Largest number of error correction codewords in a single block, across all versions
pub const MAX_EC_SIZE: usize = 30;
