//! Token hashing
//!
//! The hash is shared with every other component that embeds corpus or query
//! text (the browser-side embedder included), so its output must never change.

/// 32-bit string hash: `acc = acc * 31 + code_point` over Unicode scalar
/// values, wrapped to 32 bits and read back as a signed integer.
pub fn stable_hash(text: &str) -> i32 {
    let mut acc: u32 = 0;
    for ch in text.chars() {
        acc = (acc << 5).wrapping_sub(acc).wrapping_add(ch as u32);
    }
    acc as i32
}

/// Coordinate a token lands on: `|hash| mod dimension`.
///
/// `unsigned_abs` keeps `i32::MIN` well-defined (2^31).
pub fn bucket(hash: i32, dimension: usize) -> usize {
    hash.unsigned_abs() as usize % dimension
}

/// Lower-case the text and split it on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}
