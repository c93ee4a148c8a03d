//! Unsigned arithmetic on little-endian limb slices.
//!
//! Inputs are expected without trailing zero limbs; every function returning
//! a `Vec` returns it normalized.

use core::cmp::Ordering;

use crate::limb::{adc, mac, sbb, Limb, WideLimb, LIMB_BITS};

pub(crate) fn normalize(v: &mut Vec<Limb>) {
    while let Some(&0) = v.last() {
        v.pop();
    }
}

pub(crate) fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

pub(crate) fn add(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0;
    for (i, &x) in long.iter().enumerate() {
        let y = short.get(i).copied().unwrap_or(0);
        let (s, c) = adc(x, y, carry);
        out.push(s);
        carry = c;
    }
    if carry != 0 {
        out.push(carry);
    }
    out
}

/// `a - b`; requires `a >= b`.
pub(crate) fn sub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    debug_assert!(cmp(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0;
    for (i, &x) in a.iter().enumerate() {
        let y = b.get(i).copied().unwrap_or(0);
        let (d, br) = sbb(x, y, borrow);
        out.push(d);
        borrow = br;
    }
    debug_assert_eq!(borrow, 0);
    normalize(&mut out);
    out
}

pub(crate) fn mul(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0;
        for (j, &y) in b.iter().enumerate() {
            let (lo, hi) = mac(out[i + j], x, y, carry);
            out[i + j] = lo;
            carry = hi;
        }
        out[i + b.len()] = carry;
    }
    normalize(&mut out);
    out
}

/// Squaring with each cross product computed once.
pub(crate) fn sqr(a: &[Limb]) -> Vec<Limb> {
    if a.is_empty() {
        return Vec::new();
    }
    let n = a.len();
    let mut out = vec![0; 2 * n];

    for i in 0..n {
        let mut carry = 0;
        for j in (i + 1)..n {
            let (lo, hi) = mac(out[i + j], a[i], a[j], carry);
            out[i + j] = lo;
            carry = hi;
        }
        out[i + n] = carry;
    }

    let mut hi_bit = 0;
    for limb in out.iter_mut() {
        let next = *limb >> (LIMB_BITS - 1);
        *limb = (*limb << 1) | hi_bit;
        hi_bit = next;
    }

    let mut carry = 0;
    for i in 0..n {
        let sq = (a[i] as WideLimb) * (a[i] as WideLimb);
        let (lo, c0) = adc(out[2 * i], sq as Limb, carry);
        let (hi, c1) = adc(out[2 * i + 1], (sq >> LIMB_BITS) as Limb, c0);
        out[2 * i] = lo;
        out[2 * i + 1] = hi;
        carry = c1;
    }
    normalize(&mut out);
    out
}

pub(crate) fn shl(a: &[Limb], shift: usize) -> Vec<Limb> {
    if a.is_empty() {
        return Vec::new();
    }
    let limbs = shift / LIMB_BITS;
    let bits = shift % LIMB_BITS;
    let mut out = vec![0; limbs];
    out.reserve(a.len() + 1);
    if bits == 0 {
        out.extend_from_slice(a);
    } else {
        let mut carry = 0;
        for &x in a {
            out.push((x << bits) | carry);
            carry = x >> (LIMB_BITS - bits);
        }
        if carry != 0 {
            out.push(carry);
        }
    }
    out
}

pub(crate) fn shr(a: &[Limb], shift: usize) -> Vec<Limb> {
    let limbs = shift / LIMB_BITS;
    if limbs >= a.len() {
        return Vec::new();
    }
    let bits = shift % LIMB_BITS;
    let src = &a[limbs..];
    let mut out = Vec::with_capacity(src.len());
    if bits == 0 {
        out.extend_from_slice(src);
    } else {
        for i in 0..src.len() {
            let hi = src.get(i + 1).copied().unwrap_or(0);
            out.push((src[i] >> bits) | (hi << (LIMB_BITS - bits)));
        }
    }
    normalize(&mut out);
    out
}

pub(crate) fn div_rem_limb(a: &[Limb], d: Limb) -> (Vec<Limb>, Limb) {
    debug_assert!(d != 0);
    let mut q = vec![0; a.len()];
    let mut rem: WideLimb = 0;
    for i in (0..a.len()).rev() {
        let cur = (rem << LIMB_BITS) | a[i] as WideLimb;
        q[i] = (cur / d as WideLimb) as Limb;
        rem = cur % d as WideLimb;
    }
    normalize(&mut q);
    (q, rem as Limb)
}

/// Long division (Knuth, TAOCP vol. 2, 4.3.1, algorithm D).
pub(crate) fn div_rem(u: &[Limb], v: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    assert!(!v.is_empty(), "division by zero");
    if cmp(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }
    if v.len() == 1 {
        let (q, r) = div_rem_limb(u, v[0]);
        let r = if r == 0 { Vec::new() } else { vec![r] };
        return (q, r);
    }

    let b: WideLimb = 1 << LIMB_BITS;
    let s = v[v.len() - 1].leading_zeros() as usize;
    let vn = shl(v, s);
    let mut un = shl(u, s);
    un.resize(u.len() + 1, 0);

    let n = vn.len();
    let m = u.len() - n;
    let mut q = vec![0; m + 1];

    for j in (0..=m).rev() {
        let num = ((un[j + n] as WideLimb) << LIMB_BITS) | un[j + n - 1] as WideLimb;
        let mut qhat = num / vn[n - 1] as WideLimb;
        let mut rhat = num % vn[n - 1] as WideLimb;
        while qhat >= b
            || qhat * vn[n - 2] as WideLimb > ((rhat << LIMB_BITS) | un[j + n - 2] as WideLimb)
        {
            qhat -= 1;
            rhat += vn[n - 1] as WideLimb;
            if rhat >= b {
                break;
            }
        }

        let mut k: i64 = 0;
        for i in 0..n {
            let p = qhat * vn[i] as WideLimb;
            let t = un[i + j] as i64 - k - (p & 0xFFFF_FFFF) as i64;
            un[i + j] = t as Limb;
            k = (p >> LIMB_BITS) as i64 - (t >> LIMB_BITS);
        }
        let t = un[j + n] as i64 - k;
        un[j + n] = t as Limb;

        if t < 0 {
            qhat -= 1;
            let mut carry = 0;
            for i in 0..n {
                let (s, c) = adc(un[i + j], vn[i], carry);
                un[i + j] = s;
                carry = c;
            }
            un[j + n] = un[j + n].wrapping_add(carry);
        }
        q[j] = qhat as Limb;
    }

    normalize(&mut q);
    un.truncate(n);
    normalize(&mut un);
    (q, shr(&un, s))
}
