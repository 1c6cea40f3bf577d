use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

/// Length in bytes of the minimal unsigned little-endian encoding of `n`.
pub fn byte_length(n: &BigInt) -> usize {
    n.to_bytes_le().1.len()
}

pub fn euler(p: &BigInt, q: &BigInt) -> BigInt {
    (p - BigInt::one()) * (q - BigInt::one())
}

pub fn mod_pow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> BigInt {
    let mut a = base % modulus;
    let mut q = exponent.clone();
    let mut r: BigInt = One::one();
    while !q.is_zero() {
        if q.bit(0) {
            r = (r * &a) % modulus;
        }
        q >>= 1;
        a = (&a * &a) % modulus;
    }
    r
}

/// Inverse of `a` modulo `m` in `[0, m)`. Callers must guarantee
/// `gcd(a, m) == 1`; the result is meaningless otherwise.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.clone(), m.clone());
    let (mut p, mut r) = (BigInt::one(), BigInt::zero());
    while !b.is_zero() {
        let quotient = &a / &b;
        let remainder = &a % &b;
        a = std::mem::replace(&mut b, remainder);
        let t = &p - &quotient * &r;
        p = std::mem::replace(&mut r, t);
    }
    if p.sign() == Sign::Plus {
        p
    } else {
        p + m
    }
}
