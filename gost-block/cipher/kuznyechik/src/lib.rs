//! Kuznyechik: the 128-bit GOST R 34.12-2015 block cipher (RFC 7801).
//!
//! Nine rounds of key addition, byte substitution through `π` and the
//! linear transform `L`, followed by a final key addition. Bytes are in the
//! order of the standard: byte 0 is the most significant (`a15`).
//!
//! ```
//! use gost_kuznyechik::{cipher::{BlockEncrypt, KeyInit}, Kuznyechik};
//! use hex_literal::hex;
//!
//! let key = hex!("8899aabbccddeeff0011223344556677fedcba98765432100123456789abcdef");
//! let mut block = hex!("1122334455667700ffeeddccbbaa9988").into();
//! Kuznyechik::new(&key.into()).encrypt_block(&mut block);
//! assert_eq!(block[..], hex!("7f679d90bebc24305a468d42b9d4edcd"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U16, U32},
    AlgorithmName, BlockCipher, Key, KeyInit, KeySizeUser,
};
use core::fmt;

#[cfg(feature = "zeroize")]
use cipher::zeroize::{Zeroize, ZeroizeOnDrop};

mod consts;

use consts::{MUL, PI, PI_INV};

type Block = [u8; 16];

/// Linear feedback of `R`: `l(a15, ..., a0)`.
#[inline(always)]
fn l(s: &Block) -> u8 {
    s.iter()
        .zip(MUL.iter())
        .fold(0, |acc, (&v, t)| acc ^ t[v as usize])
}

/// `R(a15..a0) = l(a15..a0) ‖ a15..a1`.
#[inline(always)]
fn r(s: &mut Block) {
    let x = l(s);
    s.copy_within(0..15, 1);
    s[0] = x;
}

/// `R^-1(a15..a0) = a14..a0 ‖ l(a14..a0, a15)`.
#[inline(always)]
fn r_inv(s: &mut Block) {
    s.rotate_left(1);
    let x = l(s);
    s[15] = x;
}

fn l_transform(s: &mut Block) {
    for _ in 0..16 {
        r(s);
    }
}

fn l_inv_transform(s: &mut Block) {
    for _ in 0..16 {
        r_inv(s);
    }
}

#[inline(always)]
fn xor(s: &mut Block, k: &Block) {
    s.iter_mut().zip(k.iter()).for_each(|(a, b)| *a ^= b);
}

/// `LSX[k](s)`.
fn lsx(s: &mut Block, k: &Block) {
    xor(s, k);
    s.iter_mut().for_each(|v| *v = PI[*v as usize]);
    l_transform(s);
}

/// Kuznyechik block cipher.
#[derive(Clone)]
pub struct Kuznyechik {
    keys: [Block; 10],
}

impl Kuznyechik {
    fn expand_key(key: &[u8]) -> [Block; 10] {
        let mut keys = [[0u8; 16]; 10];
        keys[0].copy_from_slice(&key[..16]);
        keys[1].copy_from_slice(&key[16..]);
        let (mut k1, mut k2) = (keys[0], keys[1]);
        for i in 0..4 {
            for j in 0..8 {
                let mut c = [0u8; 16];
                c[15] = (8 * i + j + 1) as u8;
                l_transform(&mut c);
                let mut t = k1;
                lsx(&mut t, &c);
                xor(&mut t, &k2);
                k2 = k1;
                k1 = t;
            }
            keys[2 * i + 2] = k1;
            keys[2 * i + 3] = k2;
        }
        keys
    }
}

impl BlockCipher for Kuznyechik {}

impl KeySizeUser for Kuznyechik {
    type KeySize = U32;
}

impl KeyInit for Kuznyechik {
    fn new(key: &Key<Self>) -> Self {
        Self {
            keys: Self::expand_key(key),
        }
    }
}

impl fmt::Debug for Kuznyechik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Kuznyechik { ... }")
    }
}

impl AlgorithmName for Kuznyechik {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Kuznyechik")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl Drop for Kuznyechik {
    fn drop(&mut self) {
        self.keys.iter_mut().for_each(|k| k.zeroize());
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Kuznyechik {}

cipher::impl_simple_block_encdec!(
    Kuznyechik, U16, cipher, block,
    encrypt: {
        let mut s: Block = [0; 16];
        s.copy_from_slice(block.get_in());
        for k in &cipher.keys[..9] {
            lsx(&mut s, k);
        }
        xor(&mut s, &cipher.keys[9]);
        block.get_out().copy_from_slice(&s);
    }
    decrypt: {
        let mut s: Block = [0; 16];
        s.copy_from_slice(block.get_in());
        xor(&mut s, &cipher.keys[9]);
        for k in cipher.keys[..9].iter().rev() {
            l_inv_transform(&mut s);
            s.iter_mut().for_each(|v| *v = PI_INV[*v as usize]);
            xor(&mut s, k);
        }
        block.get_out().copy_from_slice(&s);
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use cipher::{BlockDecrypt, BlockEncrypt};
    use hex_literal::hex;

    const KEY: [u8; 32] = hex!("8899aabbccddeeff0011223344556677fedcba98765432100123456789abcdef");

    #[test]
    fn r3412_transforms() {
        let mut s = hex!("00000000000000000000000000000100");
        r(&mut s);
        assert_eq!(s, hex!("94000000000000000000000000000001"));
        let mut s = hex!("64a59400000000000000000000000000");
        l_transform(&mut s);
        assert_eq!(s, hex!("d456584dd0e3e84cc3166e4b7fa2890d"));
        l_inv_transform(&mut s);
        assert_eq!(s, hex!("64a59400000000000000000000000000"));
    }

    #[test]
    fn r3412_key_schedule() {
        let keys = Kuznyechik::expand_key(&KEY);
        assert_eq!(keys[2], hex!("db31485315694343228d6aef8cc78c44"));
        assert_eq!(keys[9], hex!("72e9dd7416bcf45b755dbaa88e4a4043"));
    }

    #[test]
    fn r3412_example() {
        let c = Kuznyechik::new(&KEY.into());
        let mut b = hex!("1122334455667700ffeeddccbbaa9988").into();
        c.encrypt_block(&mut b);
        assert_eq!(b[..], hex!("7f679d90bebc24305a468d42b9d4edcd"));
        c.decrypt_block(&mut b);
        assert_eq!(b[..], hex!("1122334455667700ffeeddccbbaa9988"));
    }

    #[test]
    fn r3413_ecb_blocks() {
        let c = Kuznyechik::new(&KEY.into());
        let cases = [
            (
                hex!("00112233445566778899aabbcceeff0a"),
                hex!("b429912c6e0032f9285452d76718d08b"),
            ),
            (
                hex!("112233445566778899aabbcceeff0a00"),
                hex!("f0ca33549d247ceef3f5a5313bd4b157"),
            ),
            (
                hex!("2233445566778899aabbcceeff0a0011"),
                hex!("d0b09ccde830b9eb3a02c4c5aa8ada98"),
            ),
        ];
        for (pt, ct) in cases {
            let mut b = pt.into();
            c.encrypt_block(&mut b);
            assert_eq!(b[..], ct);
        }
    }
}
