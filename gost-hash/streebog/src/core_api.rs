use core::fmt;
use digest::{
    block_buffer::Eager,
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, OutputSizeUser, TruncSide,
        UpdateCore, VariableOutputCore,
    },
    typenum::{Unsigned, U64},
    HashMarker, InvalidOutputSize, Output,
};

use crate::{consts::C, table::SHUFFLED_LIN_TABLE};

type State = [u64; 8];

/// Core of both Streebog widths; the output size picks the IV.
#[derive(Clone)]
pub struct StreebogVarCore {
    h: State,
    n: State,
    sigma: State,
}

#[inline(always)]
fn lps(h: &mut State) {
    let mut out = [0u64; 8];
    for (k, w) in out.iter_mut().enumerate() {
        for (j, t) in SHUFFLED_LIN_TABLE.iter().enumerate() {
            *w ^= t[(h[j] >> (8 * k)) as u8 as usize];
        }
    }
    *h = out;
}

#[inline(always)]
fn xor(a: &State, b: &State) -> State {
    let mut out = [0u64; 8];
    for i in 0..8 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// `g(h, N, m) = E(LPS(h ⊕ N), m) ⊕ h ⊕ m`.
fn g(h: &mut State, n: &State, m: &State) {
    let mut key = xor(h, n);
    lps(&mut key);
    let mut state = xor(&key, m);
    for c in C.iter() {
        lps(&mut state);
        key = xor(&key, c);
        lps(&mut key);
        state = xor(&state, &key);
    }
    *h = xor(&xor(&state, h), m);
}

/// 512-bit little-endian addition, wrapping.
fn add(acc: &mut State, v: &State) {
    let mut carry = false;
    for (a, &b) in acc.iter_mut().zip(v.iter()) {
        let (s1, c1) = a.overflowing_add(b);
        let (s2, c2) = s1.overflowing_add(carry as u64);
        *a = s2;
        carry = c1 || c2;
    }
}

fn to_words(block: &[u8]) -> State {
    let mut m = [0u64; 8];
    for (w, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut b = [0u8; 8];
        b.copy_from_slice(chunk);
        *w = u64::from_le_bytes(b);
    }
    m
}

impl StreebogVarCore {
    fn update_block(&mut self, block: &[u8], bits: u64) {
        let m = to_words(block);
        g(&mut self.h, &self.n, &m);
        add(&mut self.n, &[bits, 0, 0, 0, 0, 0, 0, 0]);
        add(&mut self.sigma, &m);
    }
}

impl HashMarker for StreebogVarCore {}

impl BlockSizeUser for StreebogVarCore {
    type BlockSize = U64;
}

impl BufferKindUser for StreebogVarCore {
    type BufferKind = Eager;
}

impl UpdateCore for StreebogVarCore {
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for block in blocks {
            self.update_block(block, 512);
        }
    }
}

impl OutputSizeUser for StreebogVarCore {
    type OutputSize = U64;
}

impl VariableOutputCore for StreebogVarCore {
    /// The 256-bit digest is the most significant half of the state.
    const TRUNC_SIDE: TruncSide = TruncSide::Right;

    #[inline]
    fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
        let iv = match output_size {
            32 => 0x0101_0101_0101_0101,
            64 => 0,
            _ => return Err(InvalidOutputSize),
        };
        Ok(Self {
            h: [iv; 8],
            n: [0; 8],
            sigma: [0; 8],
        })
    }

    #[inline]
    fn finalize_variable_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let block = buffer.pad_with_zeros();
        block[pos] = 1;
        self.update_block(block, (pos as u64) * 8);

        let zero = [0u64; 8];
        let (n, sigma) = (self.n, self.sigma);
        g(&mut self.h, &zero, &n);
        g(&mut self.h, &zero, &sigma);

        for (chunk, w) in out.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&w.to_le_bytes());
        }
        debug_assert_eq!(out.len(), U64::USIZE);
    }
}

impl AlgorithmName for StreebogVarCore {
    #[inline]
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Streebog")
    }
}

impl fmt::Debug for StreebogVarCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreebogVarCore { ... }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_carries_across_words() {
        let mut acc = [u64::MAX, u64::MAX, 0, 0, 0, 0, 0, 0];
        add(&mut acc, &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(acc, [0, 0, 1, 0, 0, 0, 0, 0]);

        let mut acc = [u64::MAX; 8];
        add(&mut acc, &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(acc, [0; 8]);
    }

    #[test]
    fn rejects_other_output_sizes() {
        assert!(StreebogVarCore::new(48).is_err());
    }
}
