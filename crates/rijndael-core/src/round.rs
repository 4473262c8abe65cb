//! Rijndael round transformations over a `4 * Nb` byte state.
//!
//! The state is column-major: byte `4 * c + r` sits in row `r`, column `c`.
//! Every function derives `Nb` from the slice length.

use crate::block::{xor_in_place, MAX_BLOCK_BYTES};
use crate::sbox::{galois_mul, inv_sbox, sbox};

#[inline]
fn columns(state: &[u8]) -> usize {
    debug_assert!(matches!(state.len(), 16 | 24 | 32));
    state.len() / 4
}

/// Left-rotation distance of each row. Only the widest block shifts further.
#[inline]
fn row_shifts(nb: usize) -> [usize; 4] {
    if nb < 8 {
        [0, 1, 2, 3]
    } else {
        [0, 1, 3, 4]
    }
}

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut [u8]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut [u8]) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Performs ShiftRows in place.
pub fn shift_rows(state: &mut [u8]) {
    let nb = columns(state);
    let mut tmp = [0u8; MAX_BLOCK_BYTES];
    tmp[..state.len()].copy_from_slice(state);
    for (row, shift) in row_shifts(nb).into_iter().enumerate().skip(1) {
        for col in 0..nb {
            state[4 * col + row] = tmp[4 * ((col + shift) % nb) + row];
        }
    }
}

/// Performs the inverse of ShiftRows in place.
pub fn inv_shift_rows(state: &mut [u8]) {
    let nb = columns(state);
    let mut tmp = [0u8; MAX_BLOCK_BYTES];
    tmp[..state.len()].copy_from_slice(state);
    for (row, shift) in row_shifts(nb).into_iter().enumerate().skip(1) {
        for col in 0..nb {
            state[4 * ((col + shift) % nb) + row] = tmp[4 * col + row];
        }
    }
}

fn mix_single_column(col: &mut [u8]) {
    let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
    col[0] = galois_mul(a0, 2) ^ galois_mul(a1, 3) ^ a2 ^ a3;
    col[1] = a0 ^ galois_mul(a1, 2) ^ galois_mul(a2, 3) ^ a3;
    col[2] = a0 ^ a1 ^ galois_mul(a2, 2) ^ galois_mul(a3, 3);
    col[3] = galois_mul(a0, 3) ^ a1 ^ a2 ^ galois_mul(a3, 2);
}

fn inv_mix_single_column(col: &mut [u8]) {
    let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
    col[0] = galois_mul(a0, 14) ^ galois_mul(a1, 11) ^ galois_mul(a2, 13) ^ galois_mul(a3, 9);
    col[1] = galois_mul(a0, 9) ^ galois_mul(a1, 14) ^ galois_mul(a2, 11) ^ galois_mul(a3, 13);
    col[2] = galois_mul(a0, 13) ^ galois_mul(a1, 9) ^ galois_mul(a2, 14) ^ galois_mul(a3, 11);
    col[3] = galois_mul(a0, 11) ^ galois_mul(a1, 13) ^ galois_mul(a2, 9) ^ galois_mul(a3, 14);
}

/// MixColumns over every column of the state.
#[inline]
pub fn mix_columns(state: &mut [u8]) {
    for column in state.chunks_exact_mut(4) {
        mix_single_column(column);
    }
}

/// Inverse MixColumns over every column of the state.
#[inline]
pub fn inv_mix_columns(state: &mut [u8]) {
    for column in state.chunks_exact_mut(4) {
        inv_mix_single_column(column);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut [u8], round_key: &[u8]) {
    xor_in_place(state, round_key);
}
