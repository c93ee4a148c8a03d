use super::BigInt;
use crate::limb::LIMB_BITS;

impl BigInt {
    /// Bit length of the magnitude; zero for zero.
    pub fn bits(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => {
                (self.limbs.len() - 1) * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize)
            }
        }
    }

    /// Bit `i` of the magnitude.
    pub fn bit(&self, i: usize) -> bool {
        self.limbs
            .get(i / LIMB_BITS)
            .map_or(false, |l| (l >> (i % LIMB_BITS)) & 1 == 1)
    }

    /// Index of the lowest set bit, `None` for zero.
    pub fn trailing_zeros(&self) -> Option<usize> {
        self.limbs
            .iter()
            .position(|&l| l != 0)
            .map(|i| i * LIMB_BITS + self.limbs[i].trailing_zeros() as usize)
    }
}
