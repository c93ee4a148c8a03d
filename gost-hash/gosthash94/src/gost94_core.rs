use core::fmt;
use digest::{
    block_buffer::Eager,
    core_api::{
        AlgorithmName, Block as TBlock, BlockSizeUser, Buffer, BufferKindUser, FixedOutputCore,
        OutputSizeUser, Reset, UpdateCore,
    },
    typenum::{Unsigned, U32},
    HashMarker, Output,
};
use gost89::{
    cipher::{generic_array::GenericArray, BlockEncrypt},
    Gost89,
};

use crate::params::{Block, Gost94Params};

/// Constant `C_3` of the key generation; `C_2` and `C_4` are zero.
const C3: Block = [
    0x00, 0xff, 0x00, 0xff, 0x00, 0xff, 0x00, 0xff, 0xff, 0x00, 0xff, 0x00, 0xff, 0x00, 0xff, 0x00,
    0x00, 0xff, 0xff, 0x00, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0xff,
];

fn x(a: &Block, b: &Block) -> Block {
    let mut out = *a;
    out.iter_mut().zip(b.iter()).for_each(|(o, b)| *o ^= b);
    out
}

/// `A(y4‖y3‖y2‖y1) = (y1 ⊕ y2)‖y4‖y3‖y2`, in little-endian byte order.
fn a(y: &Block) -> Block {
    let mut out = [0u8; 32];
    out[..24].copy_from_slice(&y[8..]);
    for i in 0..8 {
        out[24 + i] = y[i] ^ y[i + 8];
    }
    out
}

/// Byte transposition `φ(i + 1 + 4(k - 1)) = 8i + k`.
fn p(y: &Block) -> Block {
    let mut out = [0u8; 32];
    for i in 0..4 {
        for k in 0..8 {
            out[i + 4 * k] = y[8 * i + k];
        }
    }
    out
}

/// One step of the 16-bit word LFSR: the new top word is the XOR of words
/// 1, 2, 3, 4, 13 and 16.
fn psi(y: &mut Block) {
    let t0 = y[0] ^ y[2] ^ y[4] ^ y[6] ^ y[24] ^ y[30];
    let t1 = y[1] ^ y[3] ^ y[5] ^ y[7] ^ y[25] ^ y[31];
    y.copy_within(2.., 0);
    y[30] = t0;
    y[31] = t1;
}

#[inline(always)]
fn adc(a: &mut u64, b: u64, carry: &mut u64) {
    let ret = (*a as u128) + (b as u128) + (*carry as u128);
    *a = ret as u64;
    *carry = (ret >> 64) as u64;
}

/// Core GOST94 algorithm generic over parameters.
#[derive(Clone)]
pub struct Gost94Core<P: Gost94Params> {
    h: Block,
    n: [u64; 4],
    sigma: [u64; 4],
    cipher: Gost89,
    _m: core::marker::PhantomData<P>,
}

impl<P: Gost94Params> Gost94Core<P> {
    fn encrypt(&mut self, key: &Block, half: &mut [u8]) {
        self.cipher.set_key(key.into());
        self.cipher
            .encrypt_block(GenericArray::from_mut_slice(half));
    }

    fn shuffle(&mut self, m: &Block, s: &Block) {
        let mut res = *s;
        for _ in 0..12 {
            psi(&mut res);
        }
        res = x(&res, m);
        psi(&mut res);
        self.h = x(&self.h, &res);
        for _ in 0..61 {
            psi(&mut self.h);
        }
    }

    fn f(&mut self, m: &Block) {
        let mut s = self.h;
        let mut u = self.h;
        let mut v = *m;
        for i in 0..4 {
            if i > 0 {
                u = a(&u);
                if i == 2 {
                    u = x(&u, &C3);
                }
                v = a(&a(&v));
            }
            let k = p(&x(&u, &v));
            self.encrypt(&k, &mut s[8 * i..8 * i + 8]);
        }
        self.shuffle(m, &s);
    }

    fn update_sigma(&mut self, m: &Block) {
        let mut carry = 0;
        for (a, chunk) in self.sigma.iter_mut().zip(m.chunks_exact(8)) {
            let mut w = [0u8; 8];
            w.copy_from_slice(chunk);
            adc(a, u64::from_le_bytes(w), &mut carry);
        }
    }

    fn update_n(&mut self, len: usize) {
        let mut carry = 0;
        adc(&mut self.n[0], (len as u64) << 3, &mut carry);
        adc(&mut self.n[1], (len as u64) >> 61, &mut carry);
        adc(&mut self.n[2], 0, &mut carry);
        adc(&mut self.n[3], 0, &mut carry);
    }

    #[inline(always)]
    fn compress(&mut self, block: &Block) {
        self.f(block);
        self.update_sigma(block);
    }
}

impl<P: Gost94Params> HashMarker for Gost94Core<P> {}

impl<P: Gost94Params> BlockSizeUser for Gost94Core<P> {
    type BlockSize = U32;
}

impl<P: Gost94Params> BufferKindUser for Gost94Core<P> {
    type BufferKind = Eager;
}

impl<P: Gost94Params> OutputSizeUser for Gost94Core<P> {
    type OutputSize = U32;
}

impl<P: Gost94Params> UpdateCore for Gost94Core<P> {
    #[inline]
    fn update_blocks(&mut self, blocks: &[TBlock<Self>]) {
        self.update_n(Self::BlockSize::USIZE * blocks.len());
        for block in blocks {
            self.compress(block.as_ref());
        }
    }
}

impl<P: Gost94Params> FixedOutputCore for Gost94Core<P> {
    #[inline]
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        if pos != 0 {
            self.update_n(pos);
            let block: Block = (*buffer.pad_with_zeros()).into();
            self.compress(&block);
        }
        let mut buf = [0u8; 32];
        for (o, v) in buf.chunks_exact_mut(8).zip(self.n.iter()) {
            o.copy_from_slice(&v.to_le_bytes());
        }
        self.f(&buf);
        for (o, v) in buf.chunks_exact_mut(8).zip(self.sigma.iter()) {
            o.copy_from_slice(&v.to_le_bytes());
        }
        self.f(&buf);
        out.copy_from_slice(&self.h);
    }
}

impl<P: Gost94Params> Default for Gost94Core<P> {
    #[inline]
    fn default() -> Self {
        Self {
            h: P::H0,
            n: Default::default(),
            sigma: Default::default(),
            cipher: Gost89::with_sbox(&[0; 32].into(), &P::S_BOX),
            _m: Default::default(),
        }
    }
}

impl<P: Gost94Params> Reset for Gost94Core<P> {
    #[inline]
    fn reset(&mut self) {
        self.h = P::H0;
        self.n = Default::default();
        self.sigma = Default::default();
    }
}

impl<P: Gost94Params> AlgorithmName for Gost94Core<P> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(P::NAME)
    }
}

impl<P: Gost94Params> fmt::Debug for Gost94Core<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(P::NAME)?;
        f.write_str("Core { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gost94CryptoPro, Gost94Test};
    use digest::Digest;
    use hex_literal::hex;

    #[test]
    fn rfc5831_test_params() {
        let cases: [(&[u8], [u8; 32]); 4] = [
            (b"", hex!("ce85b99cc46752fffee35cab9a7b0278abb4c2d2055cff685af4912c49490f8d")),
            (b"abc", hex!("f3134348c44fb1b2a277729e2285ebb5cb5e0f29c975bc753b70497c06a4d51d")),
            (
                b"This is message, length=32 bytes",
                hex!("b1c466d37519b82e8319819ff32595e047a28cb6f83eff1c6916a815a637fffa"),
            ),
            (
                b"Suppose the original message has length = 50 bytes",
                hex!("471aba57a60a770d3a76130635c1fbea4ef14de51f78b4ae57dd893b62f55208"),
            ),
        ];
        for (msg, expected) in cases {
            assert_eq!(Gost94Test::digest(msg)[..], expected);
        }
    }

    #[test]
    fn cryptopro_params() {
        let cases: [(&[u8], [u8; 32]); 3] = [
            (b"", hex!("981e5f3ca30c841487830f84fb433e13ac1101569b9c13584ac483234cd656c0")),
            (b"a", hex!("e74c52dd282183bf37af0079c9f78055715a103f17e3133ceff1aacf2f403011")),
            (
                b"Suppose the original message has length = 50 bytes",
                hex!("c3730c5cbccacf915ac292676f21e8bd4ef75331d9405e5f1a61dc3130a65011"),
            ),
        ];
        for (msg, expected) in cases {
            assert_eq!(Gost94CryptoPro::digest(msg)[..], expected);
        }
    }

    #[test]
    fn reset_keeps_parameters() {
        let mut hasher = Gost94CryptoPro::new();
        hasher.update(b"garbage");
        Digest::reset(&mut hasher);
        hasher.update(b"abc");
        assert_eq!(
            hasher.finalize()[..],
            hex!("b285056dbf18d7392d7677369524dd14747459ed8143997e163b2986f92fd42c")
        );
    }

    #[test]
    fn psi_shifts_words() {
        let mut y: Block = core::array::from_fn(|i| i as u8);
        psi(&mut y);
        assert_eq!(y[..30], (2..32).map(|i| i as u8).collect::<Vec<_>>()[..]);
        assert_eq!(y[30], 0 ^ 2 ^ 4 ^ 6 ^ 24 ^ 30);
        assert_eq!(y[31], 1 ^ 3 ^ 5 ^ 7 ^ 25 ^ 31);
    }
}
