use bigint::BigInt;
use core::cell::OnceCell;

/// A point in homogeneous projective coordinates `(X : Y : Z)`.
///
/// The affine point is `(X/Z, Y/Z)`; the point at infinity is the unique
/// value with `Z = 0`. A point is tied to the [`CurveDomain`] that produced
/// it: the inverse of `Z` is computed modulo that domain's `p` on first
/// affine access and cached.
///
/// [`CurveDomain`]: crate::CurveDomain
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: BigInt,
    pub(crate) y: BigInt,
    pub(crate) z: BigInt,
    pub(crate) zinv: OnceCell<BigInt>,
}

impl ProjectivePoint {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self::new(BigInt::zero(), BigInt::one(), BigInt::zero())
    }

    pub(crate) fn new(x: BigInt, y: BigInt, z: BigInt) -> Self {
        Self {
            x,
            y,
            z,
            zinv: OnceCell::new(),
        }
    }

    /// Lifts affine coordinates without checking the curve equation.
    pub(crate) fn from_affine(x: BigInt, y: BigInt) -> Self {
        let zinv = OnceCell::new();
        let _ = zinv.set(BigInt::one());
        Self {
            x,
            y,
            z: BigInt::one(),
            zinv,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub(crate) fn is_affine(&self) -> bool {
        self.z.is_one()
    }

    /// Raw projective coordinates `(X, Y, Z)`.
    pub fn coordinates(&self) -> (&BigInt, &BigInt, &BigInt) {
        (&self.x, &self.y, &self.z)
    }
}
