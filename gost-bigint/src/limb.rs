//! Single-digit helpers. A limb is 32 bits so that every limb product fits
//! in the 64-bit wide type.

pub type Limb = u32;

pub type WideLimb = u64;

pub const LIMB_BITS: usize = 32;

pub(crate) const LIMB_BYTES: usize = 4;

/// `a + b + carry`, returning `(sum, carry)`.
#[inline(always)]
pub(crate) const fn adc(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let t = (a as WideLimb) + (b as WideLimb) + (carry as WideLimb);
    (t as Limb, (t >> LIMB_BITS) as Limb)
}

/// `a - b - borrow`, returning `(difference, borrow)` with borrow 0 or 1.
#[inline(always)]
pub(crate) const fn sbb(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let t = (a as WideLimb)
        .wrapping_sub(b as WideLimb)
        .wrapping_sub(borrow as WideLimb);
    (t as Limb, ((t >> LIMB_BITS) as Limb) & 1)
}

/// `a + b * c + carry`, returning `(low, high)`.
#[inline(always)]
pub(crate) const fn mac(a: Limb, b: Limb, c: Limb, carry: Limb) -> (Limb, Limb) {
    let t = (a as WideLimb) + (b as WideLimb) * (c as WideLimb) + (carry as WideLimb);
    (t as Limb, (t >> LIMB_BITS) as Limb)
}

/// `-m^-1 mod 2^32` for odd `m`, by Newton iteration.
pub(crate) const fn neg_inv(m: Limb) -> Limb {
    let mut inv = m;
    let mut i = 0;
    while i < 4 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(m.wrapping_mul(inv)));
        i += 1;
    }
    inv.wrapping_neg()
}
