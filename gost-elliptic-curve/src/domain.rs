use crate::{NamedCurve, ProjectivePoint};
use bigint::BigInt;
use gost_common::{Error, Result};
use hex_literal::hex;

/// Domain parameters `{p, a, b, q, G}` of `y^2 = x^3 + ax + b` over `GF(p)`
/// with a base point `G` of prime order `q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveDomain {
    pub(crate) p: BigInt,
    pub(crate) a: BigInt,
    pub(crate) b: BigInt,
    pub(crate) q: BigInt,
    pub(crate) gx: BigInt,
    pub(crate) gy: BigInt,
}

impl CurveDomain {
    /// Validates explicit parameters: `p > 3` odd, `0 <= a, b < p`, `q > 1`
    /// and `G` on the curve.
    pub fn new(
        p: BigInt,
        a: BigInt,
        b: BigInt,
        q: BigInt,
        gx: BigInt,
        gy: BigInt,
    ) -> Result<Self> {
        if p <= BigInt::from(3u32) || p.is_even() {
            return Err(Error::data("curve modulus must be an odd prime"));
        }
        for (name, v) in [("a", &a), ("b", &b), ("x", &gx), ("y", &gy)] {
            if v.is_negative() || v >= &p {
                return Err(Error::data(format!("curve parameter {} out of range", name)));
            }
        }
        if q <= BigInt::one() {
            return Err(Error::data("curve order must exceed one"));
        }
        let domain = Self {
            p,
            a,
            b,
            q,
            gx,
            gy,
        };
        if !domain.is_on_curve(&domain.generator()) {
            return Err(Error::data("base point is not on the curve"));
        }
        Ok(domain)
    }

    /// Built-in parameter set.
    pub fn named(curve: NamedCurve) -> Self {
        let params = match curve {
            NamedCurve::S256Test => &S256_TEST,
            NamedCurve::S256A | NamedCurve::X256A => &S256_A,
            NamedCurve::S256B => &S256_B,
            NamedCurve::S256C | NamedCurve::X256B => &S256_C,
            NamedCurve::T256A => &T256_A,
            NamedCurve::T512Test => &T512_TEST,
            NamedCurve::T512A => &T512_A,
            NamedCurve::T512B => &T512_B,
        };
        Self {
            p: BigInt::from_be_bytes(params.p),
            a: BigInt::from_be_bytes(params.a),
            b: BigInt::from_be_bytes(params.b),
            q: BigInt::from_be_bytes(params.q),
            gx: BigInt::from_be_bytes(params.x),
            gy: BigInt::from_be_bytes(params.y),
        }
    }

    pub fn modulus(&self) -> &BigInt {
        &self.p
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }

    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Order `q` of the base point.
    pub fn order(&self) -> &BigInt {
        &self.q
    }

    /// Byte length of a field element: 32 or 64 for the GOST sets.
    pub fn key_size(&self) -> usize {
        (self.p.bits() + 7) / 8
    }

    pub fn generator(&self) -> ProjectivePoint {
        ProjectivePoint::from_affine(self.gx.clone(), self.gy.clone())
    }

    /// Affine point `(x, y)`, checked against the curve equation.
    pub fn point(&self, x: BigInt, y: BigInt) -> Result<ProjectivePoint> {
        if x.is_negative() || y.is_negative() || x >= self.p || y >= self.p {
            return Err(Error::data("point coordinate out of range"));
        }
        let pt = ProjectivePoint::from_affine(x, y);
        if !self.is_on_curve(&pt) {
            return Err(Error::data("point is not on the curve"));
        }
        Ok(pt)
    }

    /// `Y^2 Z = X^3 + a X Z^2 + b Z^3 (mod p)`; true for the point at
    /// infinity.
    pub fn is_on_curve(&self, pt: &ProjectivePoint) -> bool {
        let p = &self.p;
        let (x, y, z) = (&pt.x, &pt.y, &pt.z);
        let z2 = z.square().modulo(p);
        let lhs = y.square().mul_mod(z, p);
        let rhs = &(&(&x.square() * x) + &(&(&self.a * x) * &z2)) + &(&(&self.b * &z2) * z);
        lhs == rhs.modulo(p)
    }

    /// Affine `(x, y)`, or `None` for the point at infinity.
    pub fn to_affine(&self, pt: &ProjectivePoint) -> Option<(BigInt, BigInt)> {
        let zinv = self.z_inverse(pt)?;
        Some((pt.x.mul_mod(zinv, &self.p), pt.y.mul_mod(zinv, &self.p)))
    }

    /// Affine x-coordinate, or `None` for the point at infinity.
    pub fn affine_x(&self, pt: &ProjectivePoint) -> Option<BigInt> {
        let zinv = self.z_inverse(pt)?;
        Some(pt.x.mul_mod(zinv, &self.p))
    }

    fn z_inverse<'a>(&self, pt: &'a ProjectivePoint) -> Option<&'a BigInt> {
        if pt.is_identity() {
            return None;
        }
        Some(pt.zinv.get_or_init(|| pt.z.mod_inverse(&self.p)))
    }

    /// Uniform scalar in `[1, q)`.
    #[cfg(feature = "rand")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
    pub fn random_scalar(
        &self,
        rng: &mut (impl rand_core::CryptoRng + rand_core::RngCore),
    ) -> BigInt {
        BigInt::random_nonzero_below(rng, &self.q)
    }

    /// Group equality, by cross-multiplication unless both points are
    /// affine.
    pub fn point_eq(&self, a: &ProjectivePoint, b: &ProjectivePoint) -> bool {
        match (a.is_identity(), b.is_identity()) {
            (true, true) => return true,
            (true, false) | (false, true) => return false,
            _ => {}
        }
        if a.is_affine() && b.is_affine() {
            return a.x.modulo(&self.p) == b.x.modulo(&self.p)
                && a.y.modulo(&self.p) == b.y.modulo(&self.p);
        }
        let p = &self.p;
        (&(&a.x * &b.z) - &(&b.x * &a.z)).modulo(p).is_zero()
            && (&(&a.y * &b.z) - &(&b.y * &a.z)).modulo(p).is_zero()
    }
}

/// Big-endian encodings of one parameter set.
struct Params {
    p: &'static [u8],
    a: &'static [u8],
    b: &'static [u8],
    q: &'static [u8],
    x: &'static [u8],
    y: &'static [u8],
}

/// `S-256-TEST`.
const S256_TEST: Params = Params {
    p: &hex!("8000000000000000000000000000000000000000000000000000000000000431"),
    a: &hex!("0000000000000000000000000000000000000000000000000000000000000007"),
    b: &hex!("5fbff498aa938ce739b8e022fbafef40563f6e6a3472fc2a514c0ce9dae23b7e"),
    q: &hex!("8000000000000000000000000000000150fe8a1892976154c59cfc193accf5b3"),
    x: &hex!("0000000000000000000000000000000000000000000000000000000000000002"),
    y: &hex!("08e2a8a0e65147d4bd6316030e16d19c85c97f0a9ca267122b96abbcea7e8fc8"),
};

/// `S-256-A`.
const S256_A: Params = Params {
    p: &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd97"),
    a: &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd94"),
    b: &hex!("00000000000000000000000000000000000000000000000000000000000000a6"),
    q: &hex!("ffffffffffffffffffffffffffffffff6c611070995ad10045841b09b761b893"),
    x: &hex!("0000000000000000000000000000000000000000000000000000000000000001"),
    y: &hex!("8d91e471e0989cda27df505a453f2b7635294f2ddf23e3b122acc99c9e9f1e14"),
};

/// `S-256-B`.
const S256_B: Params = Params {
    p: &hex!("8000000000000000000000000000000000000000000000000000000000000c99"),
    a: &hex!("8000000000000000000000000000000000000000000000000000000000000c96"),
    b: &hex!("3e1af419a269a5f866a7d3c25c3df80ae979259373ff2b182f49d4ce7e1bbc8b"),
    q: &hex!("800000000000000000000000000000015f700cfff1a624e5e497161bcc8a198f"),
    x: &hex!("0000000000000000000000000000000000000000000000000000000000000001"),
    y: &hex!("3fa8124359f96680b83d1c3eb2c070e5c545c9858d03ecfb744bf8d717717efc"),
};

/// `S-256-C`.
const S256_C: Params = Params {
    p: &hex!("9b9f605f5a858107ab1ec85e6b41c8aacf846e86789051d37998f7b9022d759b"),
    a: &hex!("9b9f605f5a858107ab1ec85e6b41c8aacf846e86789051d37998f7b9022d7598"),
    b: &hex!("000000000000000000000000000000000000000000000000000000000000805a"),
    q: &hex!("9b9f605f5a858107ab1ec85e6b41c8aa582ca3511eddfb74f02f3a6598980bb9"),
    x: &hex!("0000000000000000000000000000000000000000000000000000000000000000"),
    y: &hex!("41ece55743711a8c3cbf3783cd08c0ee4d4dc440d4641a8f366e550dfdb3bb67"),
};

/// `T-256-A`.
const T256_A: Params = Params {
    p: &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd97"),
    a: &hex!("c2173f1513981673af4892c23035a27ce25e2013bf95aa33b22c656f277e7335"),
    b: &hex!("295f9bae7428ed9ccc20e7c359a9d41a22fccd9108e17bf7ba9337a6f8ae9513"),
    q: &hex!("400000000000000000000000000000000fd8cddfc87b6635c115af556c360c67"),
    x: &hex!("91e38443a5e82c0d880923425712b2bb658b9196932e02c78b2582fe742daa28"),
    y: &hex!("32879423ab1a0375895786c4bb46e9565fde0b5344766740af268adb32322e5c"),
};

/// `T-512-A`.
const T512_A: Params = Params {
    p: &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffdc7"
        ),
    a: &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffdc4"
        ),
    b: &hex!(
            "e8c2505dedfc86ddc1bd0b2b6667f1da34b82574761cb0e879bd081cfd0b6265"
            "ee3cb090f30d27614cb4574010da90dd862ef9d4ebee4761503190785a71c760"
        ),
    q: &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "27e69532f48d89116ff22b8d4e0560609b4b38abfad2b85dcacdb1411f10b275"
        ),
    x: &hex!(
            "0000000000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000003"
        ),
    y: &hex!(
            "7503cfe87a836ae3a61b8816e25450e6ce5e1c93acf1abc1778064fdcbefa921"
            "df1626be4fd036e93d75e6a50e3a41e98028fe5fc235f5b889a589cb5215f2a4"
        ),
};

/// `T-512-B`.
const T512_B: Params = Params {
    p: &hex!(
            "8000000000000000000000000000000000000000000000000000000000000000"
            "000000000000000000000000000000000000000000000000000000000000006f"
        ),
    a: &hex!(
            "8000000000000000000000000000000000000000000000000000000000000000"
            "000000000000000000000000000000000000000000000000000000000000006c"
        ),
    b: &hex!(
            "687d1b459dc841457e3e06cf6f5e2517b97c7d614af138bcbf85dc806c4b289f"
            "3e965d2db1416d217f8b276fad1ab69c50f78bee1fa3106efb8ccbc7c5140116"
        ),
    q: &hex!(
            "8000000000000000000000000000000000000000000000000000000000000001"
            "49a1ec142565a545acfdb77bd9d40cfa8b996712101bea0ec6346c54374f25bd"
        ),
    x: &hex!(
            "0000000000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000002"
        ),
    y: &hex!(
            "1a8f7eda389b094c2c071e3647a8940f3c123b697578c213be6dd9e6c8ec7335"
            "dcb228fd1edf4a39152cbcaaf8c0398828041055f94ceeec7e21340780fe41bd"
        ),
};

/// `T-512-TEST`.
const T512_TEST: Params = Params {
    p: &hex!(
            "4531acd1fe0023c7550d267b6b2fee80922b14b2ffb90f04d4eb7c09b5d2d15d"
            "f1d852741af4704a0458047e80e4546d35b8336fac224dd81664bbf528be6373"
        ),
    a: &hex!(
            "0000000000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000007"
        ),
    b: &hex!(
            "1cff0806a31116da29d8cfa54e57eb748bc5f377e49400fdd788b649eca1ac43"
            "61834013b2ad7322480a89ca58e0cf74bc9e540c2add6897fad0a3084f302adc"
        ),
    q: &hex!(
            "4531acd1fe0023c7550d267b6b2fee80922b14b2ffb90f04d4eb7c09b5d2d15d"
            "a82f2d7ecb1dbac719905c5eecc423f1d86e25edbe23c595d644aaf187e6e6df"
        ),
    x: &hex!(
            "24d19cc64572ee30f396bf6ebbfd7a6c5213b3b3d7057cc825f91093a68cd762"
            "fd60611262cd838dc6b60aa7eee804e28bc849977fac33b4b530f1b120248a9a"
        ),
    y: &hex!(
            "2bb312a43bd2ce6e0d020613c857acddcfbf061e91e5f2c3f32447c259f39b2c"
            "83ab156d77f1496bf7eb3351e1ee4e43dc1a18b91b24640b6dbb92cb1add371e"
        ),
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NamedCurve; 10] = [
        NamedCurve::S256Test,
        NamedCurve::S256A,
        NamedCurve::S256B,
        NamedCurve::S256C,
        NamedCurve::X256A,
        NamedCurve::X256B,
        NamedCurve::T256A,
        NamedCurve::T512Test,
        NamedCurve::T512A,
        NamedCurve::T512B,
    ];

    #[test]
    fn named_base_points_are_on_curve() {
        for name in ALL {
            let curve = CurveDomain::named(name);
            assert!(curve.is_on_curve(&curve.generator()), "{}", name);
            assert_eq!(curve.key_size(), name.key_size(), "{}", name);
        }
    }

    #[test]
    fn explicit_parameters_are_validated() {
        let c = CurveDomain::named(NamedCurve::S256Test);
        let ok = CurveDomain::new(
            c.p.clone(),
            c.a.clone(),
            c.b.clone(),
            c.q.clone(),
            c.gx.clone(),
            c.gy.clone(),
        )
        .unwrap();
        assert_eq!(ok, c);

        let bad = CurveDomain::new(
            c.p.clone(),
            c.a.clone(),
            c.b.clone(),
            c.q.clone(),
            c.gx.clone(),
            &c.gy + &BigInt::one(),
        );
        assert_eq!(bad.unwrap_err().kind(), "DataError");
    }

    #[test]
    fn random_scalar_in_range() {
        use rand_core::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0x3410);
        let c = CurveDomain::named(NamedCurve::T512A);
        for _ in 0..8 {
            let d = c.random_scalar(&mut rng);
            assert!(!d.is_zero() && &d < c.order());
        }
    }

    #[test]
    fn point_rejects_off_curve() {
        let c = CurveDomain::named(NamedCurve::S256A);
        assert!(c.point(BigInt::one(), BigInt::one()).is_err());
        assert!(c.point(c.gx.clone(), c.gy.clone()).is_ok());
        assert!(c.point(c.p.clone(), c.gy.clone()).is_err());
    }
}
