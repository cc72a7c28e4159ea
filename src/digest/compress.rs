//! SHA-256 block compression: message schedule expansion and the 64 rounds.

use super::consts::ROUND_CONSTANTS;
use super::{BLOCK_SIZE, BLOCK_WORDS, ROUNDS, STATE_WORDS};

// Nested rotations: rotr(x, a) ^ rotr(x, b) == rotr(rotr(x, b - a) ^ x, a).

#[inline(always)]
const fn small_sigma0(x: u32) -> u32 {
    (x.rotate_right(11) ^ x).rotate_right(7) ^ (x >> 3)
}

#[inline(always)]
const fn small_sigma1(x: u32) -> u32 {
    (x.rotate_right(2) ^ x).rotate_right(17) ^ (x >> 10)
}

#[inline(always)]
const fn big_sigma0(x: u32) -> u32 {
    ((x.rotate_right(9) ^ x).rotate_right(11) ^ x).rotate_right(2)
}

#[inline(always)]
const fn big_sigma1(x: u32) -> u32 {
    ((x.rotate_right(14) ^ x).rotate_right(5) ^ x).rotate_right(6)
}

/// `x` picks between `y` and `z` bit by bit.
#[inline(always)]
const fn choice(x: u32, y: u32, z: u32) -> u32 {
    z ^ (x & (y ^ z))
}

/// Bitwise vote of the three inputs.
#[inline(always)]
const fn majority(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (z & (x | y))
}

/// Expand the 16 block words into the full 64-word message schedule.
fn schedule(block: &[u32; BLOCK_WORDS]) -> [u32; ROUNDS] {
    let mut w = [0u32; ROUNDS];
    w[..BLOCK_WORDS].copy_from_slice(block);

    for t in BLOCK_WORDS..ROUNDS {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }
    w
}

/// Fold one block, given as 16 big-endian words, into `state`.
pub(crate) fn compress(state: &mut [u32; STATE_WORDS], block: &[u32; BLOCK_WORDS]) {
    let w = schedule(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (k, w) in ROUND_CONSTANTS.iter().zip(w.iter()) {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(choice(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*w);
        let t2 = big_sigma0(a).wrapping_add(majority(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(value);
    }
}

/// Fold one 64-byte block into `state`.
pub(crate) fn compress_bytes(state: &mut [u32; STATE_WORDS], block: &[u8; BLOCK_SIZE]) {
    let mut words = [0u32; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    compress(state, &words);
}
