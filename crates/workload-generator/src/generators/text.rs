//! Random text generators.

use rand::Rng;

/// Characters used for generated strings.
pub const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random alphanumeric string of exactly `length` characters.
pub fn generate_string<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Generate `count` random strings of `length` characters each.
pub fn generate_string_array<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    length: usize,
) -> Vec<String> {
    (0..count).map(|_| generate_string(rng, length)).collect()
}
