//! Group law in homogeneous coordinates.
//!
//! Coordinates are kept reduced modulo `p` after every operation.

use crate::{CurveDomain, ProjectivePoint};
use bigint::BigInt;

impl CurveDomain {
    pub fn negate(&self, pt: &ProjectivePoint) -> ProjectivePoint {
        if pt.is_identity() {
            return pt.clone();
        }
        ProjectivePoint::new(pt.x.clone(), pt.y.neg_mod(&self.p), pt.z.clone())
    }

    pub fn double(&self, pt: &ProjectivePoint) -> ProjectivePoint {
        let p = &self.p;
        if pt.is_identity() {
            return pt.clone();
        }
        if pt.y.modulo(p).is_zero() {
            return ProjectivePoint::identity();
        }
        let (x1, y1, z1) = (&pt.x, &pt.y, &pt.z);

        let y1z1 = y1.mul_mod(z1, p);
        let y1sqz1 = y1z1.mul_mod(y1, p);

        // w = 3 x1^2 + a z1^2
        let mut w = &x1.square() * &BigInt::from(3u32);
        if !self.a.is_zero() {
            w = &w + &(&self.a * &z1.square());
        }
        let w = w.modulo(p);

        // x3 = 2 y1 z1 (w^2 - 8 x1 y1^2 z1)
        let x3 = (&(&(&w.square() - &(&(x1 << 3) * &y1sqz1)) << 1) * &y1z1).modulo(p);

        // y3 = 4 y1^2 z1 (3 w x1 - 2 y1^2 z1) - w^3
        let t = &(&(&w * x1) * &BigInt::from(3u32)) - &(&y1sqz1 << 1);
        let y3 = (&(&(&t << 2) * &y1sqz1) - &(&w.square() * &w)).modulo(p);

        // z3 = 8 (y1 z1)^3
        let z3 = (&(&y1z1.square() * &y1z1) << 3).modulo(p);

        ProjectivePoint::new(x3, y3, z3)
    }

    pub fn add(&self, a: &ProjectivePoint, b: &ProjectivePoint) -> ProjectivePoint {
        if a.is_identity() {
            return b.clone();
        }
        if b.is_identity() {
            return a.clone();
        }
        let p = &self.p;
        let (x1, y1, z1) = (&a.x, &a.y, &a.z);
        let (x2, y2, z2) = (&b.x, &b.y, &b.z);

        let u = (&(y2 * z1) - &(y1 * z2)).modulo(p);
        let v = (&(x2 * z1) - &(x1 * z2)).modulo(p);
        if v.is_zero() {
            return if u.is_zero() {
                self.double(a)
            } else {
                ProjectivePoint::identity()
            };
        }

        let v2 = v.square();
        let v3 = &v2 * &v;
        let x1v2 = x1 * &v2;
        let zu2 = &u.square() * z1;

        // x3 = v (z2 (z1 u^2 - 2 x1 v^2) - v^3)
        let x3 = (&(&(&(&zu2 - &(&x1v2 << 1)) * z2) - &v3) * &v).modulo(p);

        // y3 = z2 (3 u x1 v^2 - y1 v^3 - z1 u^3) + u v^3
        let t = &(&(&(&x1v2 * &BigInt::from(3u32)) * &u) - &(y1 * &v3)) - &(&zu2 * &u);
        let y3 = (&(&t * z2) + &(&u * &v3)).modulo(p);

        // z3 = v^3 z1 z2
        let z3 = (&(&v3 * z1) * z2).modulo(p);

        ProjectivePoint::new(x3, y3, z3)
    }

    /// `k * pt` with `k` recoded to non-adjacent form from `3k` and `k`.
    pub fn mul(&self, pt: &ProjectivePoint, k: &BigInt) -> ProjectivePoint {
        if pt.is_identity() || k.is_zero() {
            return ProjectivePoint::identity();
        }
        if k.is_negative() {
            return self.mul(&self.negate(pt), &-k);
        }
        let e = k;
        let h = e * &BigInt::from(3u32);
        let neg = self.negate(pt);
        let mut r = pt.clone();
        for i in (1..h.bits() - 1).rev() {
            r = self.double(&r);
            match (h.bit(i), e.bit(i)) {
                (true, false) => r = self.add(&r, pt),
                (false, true) => r = self.add(&r, &neg),
                _ => {}
            }
        }
        r
    }

    /// `j * a + k * b` in one pass of shared doublings (Shamir's trick).
    pub fn lincomb(
        &self,
        a: &ProjectivePoint,
        j: &BigInt,
        b: &ProjectivePoint,
        k: &BigInt,
    ) -> ProjectivePoint {
        if j.is_negative() || k.is_negative() {
            return self.add(&self.mul(a, j), &self.mul(b, k));
        }
        let both = self.add(a, b);
        let mut r = ProjectivePoint::identity();
        for i in (0..j.bits().max(k.bits())).rev() {
            r = self.double(&r);
            match (j.bit(i), k.bit(i)) {
                (true, true) => r = self.add(&r, &both),
                (true, false) => r = self.add(&r, a),
                (false, true) => r = self.add(&r, b),
                (false, false) => {}
            }
        }
        r
    }
}
