//! RIPEMD-160 message digest.
//!
//! Whole-message only: the state is created, fed every padded block and
//! serialized inside a single call to [`hash`].

use alloc::string::String;
use alloc::vec::Vec;

/// Length of a RIPEMD-160 digest in bytes.
pub const DIGEST_LEN: usize = 20;

const BLOCK_LEN: usize = 64;

const INITIAL_STATE: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

// Additive constants, one per round.
const K_LEFT: [u32; 5] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xa953fd4e];
const K_RIGHT: [u32; 5] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x7a6d76e9, 0x00000000];

// Message word selection.
const R_LEFT: [usize; 80] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8,
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12,
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2,
    4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13,
];
const R_RIGHT: [usize; 80] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12,
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2,
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13,
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14,
    12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11,
];

// Left-rotation amounts.
const S_LEFT: [u32; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
    9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];
const S_RIGHT: [u32; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
    8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

/// Non-linear function for `round` (0..5) of the left line.
///
/// The right line uses the same functions in reverse order, i.e.
/// `f(4 - round, ..)`.
#[inline]
fn f(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        3 => (x & z) | (y & !z),
        _ => x ^ (y | !z),
    }
}

/// One 80-step line of the compression function.
///
/// Returns the five working words after the final step.
#[inline]
fn line(
    state: &[u32; 5],
    words: &[u32; 16],
    selection: &[usize; 80],
    shifts: &[u32; 80],
    constants: &[u32; 5],
    right: bool,
) -> [u32; 5] {
    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for j in 0..80 {
        let round = j / 16;
        let func = if right { 4 - round } else { round };

        let t = a
            .wrapping_add(f(func, b, c, d))
            .wrapping_add(words[selection[j]])
            .wrapping_add(constants[round])
            .rotate_left(shifts[j])
            .wrapping_add(e);

        a = e;
        e = d;
        d = c.rotate_left(10);
        c = b;
        b = t;
    }

    [a, b, c, d, e]
}

/// Compress one 64-byte block into `state`.
fn compress(state: &mut [u32; 5], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);

    let mut words = [0u32; 16];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let [al, bl, cl, dl, el] = line(state, &words, &R_LEFT, &S_LEFT, &K_LEFT, false);
    let [ar, br, cr, dr, er] = line(state, &words, &R_RIGHT, &S_RIGHT, &K_RIGHT, true);

    let t = state[1].wrapping_add(cl).wrapping_add(dr);
    state[1] = state[2].wrapping_add(dl).wrapping_add(er);
    state[2] = state[3].wrapping_add(el).wrapping_add(ar);
    state[3] = state[4].wrapping_add(al).wrapping_add(br);
    state[4] = state[0].wrapping_add(bl).wrapping_add(cr);
    state[0] = t;
}

/// Pad `message` to a multiple of 64 bytes.
///
/// Layout: message, `0x80`, zeros until 56 mod 64, then the bit length as a
/// 64-bit little-endian integer. A message already at 56 mod 64 spills into
/// an extra block.
fn pad(message: &[u8]) -> Vec<u8> {
    let rem = message.len() % BLOCK_LEN;
    let zeros = if rem < 56 { 55 - rem } else { 119 - rem };
    let bit_len = (message.len() as u64).wrapping_mul(8);

    let mut padded = Vec::with_capacity(message.len() + 1 + zeros + 8);
    padded.extend_from_slice(message);
    padded.push(0x80);
    padded.resize(padded.len() + zeros, 0);
    padded.extend_from_slice(&bit_len.to_le_bytes());

    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);
    padded
}

/// RIPEMD-160 digest of `message`.
pub fn hash(message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut state = INITIAL_STATE;

    for block in pad(message).chunks_exact(BLOCK_LEN) {
        compress(&mut state, block);
    }

    let mut digest = [0u8; DIGEST_LEN];
    for (out, word) in digest.chunks_exact_mut(4).zip(state.iter()) {
        out.copy_from_slice(&word.to_le_bytes());
    }
    digest
}

/// RIPEMD-160 digest of `message` as lowercase hex.
pub fn hash_hex(message: &[u8]) -> String {
    hex::encode(hash(message))
}
