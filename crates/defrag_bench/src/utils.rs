//! Benchmark utilities.

use rand::Rng;

/// Generate a random layout line with `files` files.
///
/// File lengths are 1-9 and free runs 0-`max_free`.
pub fn random_layout(files: usize, max_free: u8) -> String {
    let mut rng = rand::thread_rng();
    let max_free = max_free.min(9);
    let mut digits = String::with_capacity(files * 2);
    for _ in 0..files {
        digits.push(char::from(b'0' + rng.gen_range(1..=9u8)));
        digits.push(char::from(b'0' + rng.gen_range(0..=max_free)));
    }
    digits
}

/// Generate a layout where every file is followed by the same free run.
pub fn uniform_layout(files: usize, file_len: u8, free_len: u8) -> String {
    let pair = [
        char::from(b'0' + file_len.clamp(1, 9)),
        char::from(b'0' + free_len.min(9)),
    ];
    (0..files).flat_map(|_| pair).collect()
}
