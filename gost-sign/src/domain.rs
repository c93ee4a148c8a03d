use bigint::BigInt;
use gost_common::{Error, Result};
use hex_literal::hex;

/// GOST R 34.10-94 parameters `{p, q, a}`: `q` a prime divisor of `p - 1`
/// and `a` an element of order `q` modulo `p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpModDomain {
    p: BigInt,
    q: BigInt,
    a: BigInt,
}

impl ExpModDomain {
    pub fn new(p: BigInt, q: BigInt, a: BigInt) -> Result<Self> {
        if p <= BigInt::from(3u32) || p.is_even() {
            return Err(Error::data("modulus must be an odd prime"));
        }
        if q <= BigInt::one() || !(&p - &BigInt::one()).modulo(&q).is_zero() {
            return Err(Error::data("order must divide p - 1"));
        }
        if a <= BigInt::one() || a >= p || !a.mod_pow(&q, &p).is_one() {
            return Err(Error::data("generator must have order q"));
        }
        Ok(Self { p, q, a })
    }

    /// The `S-TEST` set of GOST R 34.10-94 (512-bit `p`, 256-bit `q`).
    pub fn test() -> Self {
        Self {
            p: BigInt::from_be_bytes(&S_TEST_P),
            q: BigInt::from_be_bytes(&S_TEST_Q),
            a: BigInt::from_be_bytes(&S_TEST_A),
        }
    }

    pub fn modulus(&self) -> &BigInt {
        &self.p
    }

    pub fn order(&self) -> &BigInt {
        &self.q
    }

    pub fn generator(&self) -> &BigInt {
        &self.a
    }

    /// Byte length of `p`, the size of an encoded public key.
    pub fn modulus_size(&self) -> usize {
        (self.p.bits() + 7) / 8
    }

    /// Byte length of `q`, the size of a private key and of `r` and `s`.
    pub fn order_size(&self) -> usize {
        (self.q.bits() + 7) / 8
    }
}

const S_TEST_P: [u8; 64] = hex!(
    "ee8172ae8996608fb69359b89eb82a69854510e2977a4d63bc97322ce5dc3386"
    "ea0a12b343e9190f23177539845839786bb0c345d165976ef2195ec9b1c379e3"
);
const S_TEST_Q: [u8; 32] =
    hex!("98915e7ec8265edfcda31e88f24809ddb064bdc7285dd50d7289f0ac6f49dd2d");
const S_TEST_A: [u8; 64] = hex!(
    "9e96031500c8774a869582d4afde2127afad2538b4b6270a6f7c8837b50d50f2"
    "06755984a49e509304d648be2ab5aab18ebe2cd46ac3d8495b142aa6ce23e21c"
);
