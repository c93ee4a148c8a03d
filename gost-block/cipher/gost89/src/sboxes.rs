use core::{fmt, str::FromStr};
use gost_common::Error;

/// Eight rows of sixteen nibbles; row `i` substitutes bits `4i..4i+4`.
pub type Rows = [[u8; 16]; 8];

/// Substitution box of GOST 28147-89 and Magma.
///
/// `E-*` boxes are the encryption parameter sets (RFC 4357, RFC 7836),
/// `D-*` the GOST R 34.11-94 hash parameter sets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sbox {
    /// `id-Gost28147-89-TestParamSet`.
    ETest,
    /// `id-Gost28147-89-CryptoPro-A-ParamSet`.
    EA,
    EB,
    EC,
    ED,
    /// `id-tc26-gost-28147-param-Z`, the Magma box.
    EZ,
    /// `id-GostR3411-94-TestParamSet`.
    DTest,
    /// `id-GostR3411-94-CryptoProParamSet`.
    DA,
    /// Caller supplied rows; every row must be a permutation of `0..16`.
    Custom(Rows),
}

impl Sbox {
    /// Parameter sets tried, in order, when unpacking a SignalCom key
    /// ensemble whose check value does not verify under the configured box.
    pub const FALLBACKS: [Sbox; 6] = [
        Sbox::EA,
        Sbox::EB,
        Sbox::EC,
        Sbox::ED,
        Sbox::ETest,
        Sbox::EZ,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ETest => "E-TEST",
            Self::EA => "E-A",
            Self::EB => "E-B",
            Self::EC => "E-C",
            Self::ED => "E-D",
            Self::EZ => "E-Z",
            Self::DTest => "D-TEST",
            Self::DA => "D-A",
            Self::Custom(_) => "CUSTOM",
        }
    }

    pub fn rows(&self) -> &Rows {
        match self {
            Self::ETest => &E_TEST,
            Self::EA => &E_A,
            Self::EB => &E_B,
            Self::EC => &E_C,
            Self::ED => &E_D,
            Self::EZ => &E_Z,
            Self::DTest => &D_TEST,
            Self::DA => &D_A,
            Self::Custom(rows) => rows,
        }
    }

    /// Builds a custom box, rejecting rows that are not permutations.
    pub fn custom(rows: Rows) -> Result<Self, Error> {
        for row in rows.iter() {
            let mut seen = 0u16;
            for &v in row {
                if v > 15 {
                    return Err(Error::data("S-box entries must be nibbles"));
                }
                seen |= 1 << v;
            }
            if seen != 0xFFFF {
                return Err(Error::data("S-box row is not a permutation"));
            }
        }
        Ok(Self::Custom(rows))
    }

    pub(crate) fn expand(&self) -> SboxTable {
        SboxTable::new(self.rows())
    }
}

impl FromStr for Sbox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "E-TEST" => Self::ETest,
            "E-A" => Self::EA,
            "E-B" => Self::EB,
            "E-C" => Self::EC,
            "E-D" => Self::ED,
            "E-Z" => Self::EZ,
            "D-TEST" => Self::DTest,
            "D-A" => Self::DA,
            "E-SC" | "D-SC" => {
                return Err(Error::not_supported(format!("S-box {} is not available", s)))
            }
            _ => return Err(Error::syntax(format!("unknown S-box {:?}", s))),
        })
    }
}

impl fmt::Display for Sbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte-wide lookup: entry `j` substitutes byte `j` of the word through rows
/// `2j` and `2j + 1` at once.
#[derive(Clone)]
pub(crate) struct SboxTable([[u8; 256]; 4]);

impl SboxTable {
    fn new(rows: &Rows) -> Self {
        let mut t = [[0u8; 256]; 4];
        for (j, tj) in t.iter_mut().enumerate() {
            for (b, v) in tj.iter_mut().enumerate() {
                *v = rows[2 * j][b & 15] | (rows[2 * j + 1][b >> 4] << 4);
            }
        }
        Self(t)
    }

    /// Round function: add the key word, substitute, rotate left by 11.
    #[inline(always)]
    pub(crate) fn g(&self, a: u32, k: u32) -> u32 {
        let x = a.wrapping_add(k).to_le_bytes();
        u32::from_le_bytes([
            self.0[0][x[0] as usize],
            self.0[1][x[1] as usize],
            self.0[2][x[2] as usize],
            self.0[3][x[3] as usize],
        ])
        .rotate_left(11)
    }
}

const E_TEST: Rows = [
    [4, 2, 15, 5, 9, 1, 0, 8, 14, 3, 11, 12, 13, 7, 10, 6],
    [12, 9, 15, 14, 8, 1, 3, 10, 2, 7, 4, 13, 6, 0, 11, 5],
    [13, 8, 14, 12, 7, 3, 9, 10, 1, 5, 2, 4, 6, 15, 0, 11],
    [14, 9, 11, 2, 5, 15, 7, 1, 0, 13, 12, 6, 10, 4, 3, 8],
    [3, 14, 5, 9, 6, 8, 0, 13, 10, 11, 7, 12, 2, 1, 15, 4],
    [8, 15, 6, 11, 1, 9, 12, 5, 13, 3, 7, 10, 0, 14, 2, 4],
    [9, 11, 12, 0, 3, 6, 7, 5, 4, 8, 14, 15, 1, 10, 2, 13],
    [12, 6, 5, 2, 11, 0, 9, 13, 3, 14, 7, 10, 15, 4, 1, 8],
];

const E_A: Rows = [
    [9, 6, 3, 2, 8, 11, 1, 7, 10, 4, 14, 15, 12, 0, 13, 5],
    [3, 7, 14, 9, 8, 10, 15, 0, 5, 2, 6, 12, 11, 4, 13, 1],
    [14, 4, 6, 2, 11, 3, 13, 8, 12, 15, 5, 10, 0, 7, 1, 9],
    [14, 7, 10, 12, 13, 1, 3, 9, 0, 2, 11, 4, 15, 8, 5, 6],
    [11, 5, 1, 9, 8, 13, 15, 0, 14, 4, 2, 3, 12, 7, 10, 6],
    [3, 10, 13, 12, 1, 2, 0, 11, 7, 5, 9, 4, 8, 15, 14, 6],
    [1, 13, 2, 9, 7, 10, 6, 0, 8, 12, 4, 5, 15, 3, 11, 14],
    [11, 10, 15, 5, 0, 12, 14, 8, 6, 2, 3, 9, 1, 7, 13, 4],
];

const E_B: Rows = [
    [8, 4, 11, 1, 3, 5, 0, 9, 2, 14, 10, 12, 13, 6, 7, 15],
    [0, 1, 2, 10, 4, 13, 5, 12, 9, 7, 3, 15, 11, 8, 6, 14],
    [14, 12, 0, 10, 9, 2, 13, 11, 7, 5, 8, 15, 3, 6, 1, 4],
    [7, 5, 0, 13, 11, 6, 1, 2, 3, 10, 12, 15, 4, 14, 9, 8],
    [2, 7, 12, 15, 9, 5, 10, 11, 1, 4, 0, 13, 6, 8, 14, 3],
    [8, 3, 2, 6, 4, 13, 14, 11, 12, 1, 7, 15, 10, 0, 9, 5],
    [5, 2, 10, 11, 9, 1, 12, 3, 7, 4, 13, 0, 6, 15, 8, 14],
    [0, 4, 11, 14, 8, 3, 7, 1, 10, 2, 9, 6, 15, 13, 5, 12],
];

const E_C: Rows = [
    [1, 11, 12, 2, 9, 13, 0, 15, 4, 5, 8, 14, 10, 7, 6, 3],
    [0, 1, 7, 13, 11, 4, 5, 2, 8, 14, 15, 12, 9, 10, 6, 3],
    [8, 2, 5, 0, 4, 9, 15, 10, 3, 7, 12, 13, 6, 14, 1, 11],
    [3, 6, 0, 1, 5, 13, 10, 8, 11, 2, 9, 7, 14, 15, 12, 4],
    [8, 13, 11, 0, 4, 5, 1, 2, 9, 3, 12, 14, 6, 15, 10, 7],
    [12, 9, 11, 1, 8, 14, 2, 4, 7, 3, 6, 5, 10, 0, 15, 13],
    [10, 9, 6, 8, 13, 14, 2, 0, 15, 3, 5, 11, 4, 1, 12, 7],
    [7, 4, 0, 5, 10, 2, 15, 14, 12, 6, 1, 11, 13, 9, 3, 8],
];

const E_D: Rows = [
    [15, 12, 2, 10, 6, 4, 5, 0, 7, 9, 14, 13, 1, 11, 8, 3],
    [11, 6, 3, 4, 12, 15, 14, 2, 7, 13, 8, 0, 5, 10, 9, 1],
    [1, 12, 11, 0, 15, 14, 6, 5, 10, 13, 4, 8, 9, 3, 7, 2],
    [1, 5, 14, 12, 10, 7, 0, 13, 6, 2, 11, 4, 9, 3, 15, 8],
    [0, 12, 8, 9, 13, 2, 10, 11, 7, 3, 6, 5, 4, 14, 15, 1],
    [8, 0, 15, 3, 2, 5, 14, 11, 1, 10, 4, 7, 12, 9, 13, 6],
    [3, 0, 6, 15, 1, 14, 9, 2, 13, 8, 12, 4, 11, 10, 5, 7],
    [1, 10, 6, 8, 15, 11, 0, 4, 12, 3, 5, 9, 7, 13, 2, 14],
];

const E_Z: Rows = [
    [12, 4, 6, 2, 10, 5, 11, 9, 14, 8, 13, 7, 0, 3, 15, 1],
    [6, 8, 2, 3, 9, 10, 5, 12, 1, 14, 4, 7, 11, 13, 0, 15],
    [11, 3, 5, 8, 2, 15, 10, 13, 14, 1, 7, 4, 12, 9, 6, 0],
    [12, 8, 2, 1, 13, 4, 15, 6, 7, 0, 10, 5, 3, 14, 9, 11],
    [7, 15, 5, 10, 8, 1, 6, 13, 0, 9, 3, 14, 11, 4, 2, 12],
    [5, 13, 15, 6, 9, 2, 12, 10, 11, 7, 8, 1, 4, 3, 14, 0],
    [8, 14, 2, 5, 6, 9, 1, 12, 15, 4, 11, 0, 13, 10, 3, 7],
    [1, 7, 14, 13, 0, 5, 8, 3, 4, 15, 10, 6, 9, 12, 11, 2],
];

const D_TEST: Rows = [
    [4, 10, 9, 2, 13, 8, 0, 14, 6, 11, 1, 12, 7, 15, 5, 3],
    [14, 11, 4, 12, 6, 13, 15, 10, 2, 3, 8, 1, 0, 7, 5, 9],
    [5, 8, 1, 13, 10, 3, 4, 2, 14, 15, 12, 7, 6, 0, 9, 11],
    [7, 13, 10, 1, 0, 8, 9, 15, 14, 4, 6, 12, 11, 2, 5, 3],
    [6, 12, 7, 1, 5, 15, 13, 8, 4, 10, 9, 14, 0, 3, 11, 2],
    [4, 11, 10, 0, 7, 2, 1, 13, 3, 6, 8, 5, 9, 12, 15, 14],
    [13, 11, 4, 1, 3, 15, 5, 9, 0, 10, 14, 7, 6, 8, 2, 12],
    [1, 15, 13, 0, 5, 7, 10, 4, 9, 2, 3, 14, 6, 11, 8, 12],
];

const D_A: Rows = [
    [10, 4, 5, 6, 8, 1, 3, 7, 13, 12, 14, 0, 9, 2, 11, 15],
    [5, 15, 4, 0, 2, 13, 11, 9, 1, 7, 6, 3, 12, 14, 10, 8],
    [7, 15, 12, 14, 9, 4, 1, 0, 3, 11, 5, 2, 6, 10, 8, 13],
    [4, 10, 7, 12, 0, 15, 2, 8, 14, 1, 6, 5, 13, 11, 9, 3],
    [7, 6, 4, 11, 9, 12, 2, 10, 1, 8, 0, 14, 15, 13, 3, 5],
    [7, 6, 2, 4, 13, 9, 15, 0, 10, 1, 5, 11, 8, 14, 12, 3],
    [13, 14, 4, 1, 7, 0, 5, 10, 3, 12, 8, 15, 6, 2, 9, 11],
    [1, 3, 10, 9, 5, 11, 4, 15, 8, 6, 7, 14, 13, 0, 2, 12],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rows_are_permutations() {
        for name in ["E-TEST", "E-A", "E-B", "E-C", "E-D", "E-Z", "D-TEST", "D-A"] {
            let sbox: Sbox = name.parse().unwrap();
            assert!(Sbox::custom(*sbox.rows()).is_ok(), "{}", name);
            assert_eq!(sbox.name(), name);
        }
    }

    #[test]
    fn unavailable_and_unknown() {
        assert_eq!("e-sc".parse::<Sbox>().unwrap_err().kind(), "NotSupportedError");
        assert_eq!("E-Q".parse::<Sbox>().unwrap_err().kind(), "SyntaxError");
    }

    #[test]
    fn custom_rejects_repeats() {
        let mut rows = *Sbox::EA.rows();
        rows[3][0] = rows[3][1];
        assert!(Sbox::custom(rows).is_err());
        rows[3][0] = 16;
        assert!(Sbox::custom(rows).is_err());
    }

    #[test]
    fn table_matches_nibble_substitution() {
        let rows = Sbox::ETest.rows();
        let t = Sbox::ETest.expand();
        let x = 0x89AB_CDEFu32;
        let mut y = 0u32;
        for i in 0..8 {
            y |= (rows[i][((x >> (4 * i)) & 15) as usize] as u32) << (4 * i);
        }
        assert_eq!(t.g(x, 0), y.rotate_left(11));
    }
}
