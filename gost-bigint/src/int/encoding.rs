use super::BigInt;
use crate::limb::{Limb, LIMB_BYTES};
use core::{fmt, str::FromStr};

/// Failure to parse a textual integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseError;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid integer literal")
    }
}

impl std::error::Error for ParseError {}

const DECIMAL_CHUNK: u32 = 1_000_000_000;

impl BigInt {
    /// Non-negative integer from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let limbs = bytes
            .rchunks(LIMB_BYTES)
            .map(|chunk| chunk.iter().fold(0, |acc, &b| (acc << 8) | b as Limb))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Non-negative integer from little-endian bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let limbs = bytes
            .chunks(LIMB_BYTES)
            .map(|chunk| chunk.iter().rev().fold(0, |acc, &b| (acc << 8) | b as Limb))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Minimal big-endian encoding of the magnitude; empty for zero.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.to_le_bytes();
        out.reverse();
        out
    }

    /// Minimal little-endian encoding of the magnitude; empty for zero.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self.limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
        while let Some(&0) = out.last() {
            out.pop();
        }
        out
    }

    /// Big-endian magnitude left-padded to `len` bytes, or `None` if it does
    /// not fit.
    pub fn to_be_bytes_padded(&self, len: usize) -> Option<Vec<u8>> {
        let mut out = self.to_le_bytes_padded(len)?;
        out.reverse();
        Some(out)
    }

    /// Little-endian magnitude right-padded to `len` bytes, or `None` if it
    /// does not fit.
    pub fn to_le_bytes_padded(&self, len: usize) -> Option<Vec<u8>> {
        let mut out = self.to_le_bytes();
        if out.len() > len {
            return None;
        }
        out.resize(len, 0);
        Some(out)
    }

    /// Parses big-endian hexadecimal with an optional `-` sign and `0x`
    /// prefix. Whitespace is not accepted.
    pub fn from_be_hex(s: &str) -> Result<Self, ParseError> {
        let (negative, digits) = split_sign(s);
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.is_empty() {
            return Err(ParseError);
        }
        let mut limbs = Vec::with_capacity(digits.len() / 8 + 1);
        let bytes = digits.as_bytes();
        for chunk in bytes.rchunks(8) {
            let mut limb: Limb = 0;
            for &c in chunk {
                let v = (c as char).to_digit(16).ok_or(ParseError)?;
                limb = (limb << 4) | v;
            }
            limbs.push(limb);
        }
        Ok(Self::from_parts(negative, limbs))
    }

    /// Parses decimal digits with an optional `-` sign.
    pub fn from_dec(s: &str) -> Result<Self, ParseError> {
        let (negative, digits) = split_sign(s);
        if digits.is_empty() {
            return Err(ParseError);
        }
        let mut acc = BigInt::zero();
        let ten = BigInt::from(10u32);
        for c in digits.chars() {
            let v = c.to_digit(10).ok_or(ParseError)?;
            acc = &(&acc * &ten) + &BigInt::from(v);
        }
        Ok(if negative { -acc } else { acc })
    }

    /// Lowercase hexadecimal, `-` prefixed when negative, `0` for zero.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

impl FromStr for BigInt {
    type Err = ParseError;

    /// Decimal, or hexadecimal with a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, digits) = split_sign(s);
        if digits.starts_with("0x") || digits.starts_with("0X") {
            Self::from_be_hex(s)
        } else {
            Self::from_dec(s)
        }
    }
}

fn write_hex(n: &BigInt, f: &mut fmt::Formatter<'_>, upper: bool) -> fmt::Result {
    let mut s = String::with_capacity(n.limbs.len() * 8 + 1);
    if n.negative {
        s.push('-');
    }
    match n.limbs.split_last() {
        None => s.push('0'),
        Some((top, rest)) => {
            if upper {
                s.push_str(&format!("{:X}", top));
                for l in rest.iter().rev() {
                    s.push_str(&format!("{:08X}", l));
                }
            } else {
                s.push_str(&format!("{:x}", top));
                for l in rest.iter().rev() {
                    s.push_str(&format!("{:08x}", l));
                }
            }
        }
    }
    f.write_str(&s)
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(self, f, false)
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(self, f, true)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut chunks = Vec::new();
        let mut n = self.abs();
        while !n.is_zero() {
            let (q, r) = n.div_rem_u32(DECIMAL_CHUNK);
            chunks.push(r);
            n = q;
        }
        let mut s = String::with_capacity(chunks.len() * 9 + 1);
        if self.negative {
            s.push('-');
        }
        let mut iter = chunks.iter().rev();
        if let Some(top) = iter.next() {
            s.push_str(&top.to_string());
        }
        for c in iter {
            s.push_str(&format!("{:09}", c));
        }
        f.write_str(&s)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({:#x})", Hex(self))
    }
}

/// Adapter so `Debug` can use the alternate `0x` prefix with the sign first.
struct Hex<'a>(&'a BigInt);

impl fmt::LowerHex for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.negative {
            f.write_str("-0x")?;
            write_hex(&self.0.abs(), f, false)
        } else {
            f.write_str("0x")?;
            write_hex(self.0, f, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;
    use hex_literal::hex;

    #[test]
    fn from_be_bytes() {
        let n = BigInt::from_be_bytes(&hex!("0011223344556677"));
        assert_eq!(n.limbs(), &[0x44556677, 0x00112233]);
    }

    #[test]
    fn from_le_bytes() {
        let n = BigInt::from_le_bytes(&hex!("7766554433221100"));
        assert_eq!(n.limbs(), &[0x44556677, 0x00112233]);
    }

    #[test]
    fn odd_length_bytes() {
        let n = BigInt::from_be_bytes(&hex!("0102030405"));
        assert_eq!(n.limbs(), &[0x02030405, 0x01]);
        assert_eq!(n.to_be_bytes(), hex!("0102030405").to_vec());
        assert_eq!(n.to_le_bytes(), hex!("0504030201").to_vec());
    }

    #[test]
    fn padded_encoding() {
        let n = BigInt::from(0x0102u32);
        assert_eq!(n.to_be_bytes_padded(4).unwrap(), hex!("00000102").to_vec());
        assert_eq!(n.to_le_bytes_padded(4).unwrap(), hex!("02010000").to_vec());
        assert!(n.to_be_bytes_padded(1).is_none());
        assert_eq!(BigInt::zero().to_be_bytes_padded(2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn from_be_hex() {
        let n = BigInt::from_be_hex("00112233445566778899aabbccddeeff").unwrap();
        assert_eq!(n.limbs(), &[0xccddeeff, 0x8899aabb, 0x44556677, 0x00112233]);
        assert_eq!(BigInt::from_be_hex("-0x1F").unwrap(), BigInt::from(-31i64));
        assert!(BigInt::from_be_hex("xyz").is_err());
        assert!(BigInt::from_be_hex("").is_err());
    }

    #[test]
    fn hex_upper_lower() {
        let hex = "AAAAAAAABBBBBBBBCCCCCCCC0000000D";
        let n = BigInt::from_be_hex(hex).unwrap();
        assert_eq!(format!("{:X}", n), hex);
        assert_eq!(n.to_hex(), hex.to_ascii_lowercase());
        assert_eq!(BigInt::zero().to_hex(), "0");
        assert_eq!(format!("{:?}", BigInt::from(-255i64)), "BigInt(-0xff)");
    }

    #[test]
    fn decimal_round_trip() {
        let s = "-123456789012345678901234567890";
        let n: BigInt = s.parse().unwrap();
        assert_eq!(n.to_string(), s);
        assert_eq!("0x10".parse::<BigInt>().unwrap(), BigInt::from(16u32));
        assert_eq!(BigInt::from(1_000_000_000u32).to_string(), "1000000000");
        assert!("12a".parse::<BigInt>().is_err());
    }
}
