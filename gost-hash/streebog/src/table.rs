use crate::consts::{A, PI};

/// `SHUFFLED_LIN_TABLE[j][x]`: the linear transform of a word whose byte `j`
/// is `PI[x]` and whose other bytes are zero.
///
/// `L(P(S(state)))` then reduces to eight lookups per output word.
pub(crate) const SHUFFLED_LIN_TABLE: [[u64; 256]; 8] = build();

const fn build() -> [[u64; 256]; 8] {
    let mut table = [[0u64; 256]; 8];
    let mut j = 0;
    while j < 8 {
        let mut x = 0;
        while x < 256 {
            let s = PI[x] as usize;
            let mut v = 0u64;
            let mut b = 0;
            while b < 8 {
                if (s >> b) & 1 == 1 {
                    v ^= A[63 - (8 * j + b)];
                }
                b += 1;
            }
            table[j][x] = v;
            x += 1;
        }
        j += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bit-by-bit linear transform of one word.
    fn l(v: u64) -> u64 {
        (0..64)
            .filter(|i| (v >> (63 - i)) & 1 == 1)
            .fold(0, |acc, i| acc ^ A[i])
    }

    #[test]
    fn table_matches_linear_transform() {
        for j in 0..8 {
            for x in [0usize, 1, 0x5a, 0xff] {
                let word = (PI[x] as u64) << (8 * j);
                assert_eq!(SHUFFLED_LIN_TABLE[j][x], l(word));
            }
        }
    }

    #[test]
    fn table_is_linear_in_each_column() {
        // l(a ^ b) = l(a) ^ l(b) for the substituted bytes.
        let inv = |y: u8| PI.iter().position(|&p| p == y).unwrap();
        let (a, b) = (0x13u8, 0xc4u8);
        let t = &SHUFFLED_LIN_TABLE[3];
        assert_eq!(t[inv(a ^ b)], t[inv(a)] ^ t[inv(b)]);
    }
}
