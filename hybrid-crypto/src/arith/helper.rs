use crate::errors::HybridCryptoError;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Computes the greatest common divisor of two numbers.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Finds (g, x, y) such that ax + by = g = gcd(a, b).
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    if old_r.is_negative() {
        return (-old_r, -old_s, -old_t);
    }

    (old_r, old_s, old_t)
}

/// Computes the modular multiplicative inverse `a^-1 mod modulus`.
///
/// The inverse exists if and only if `gcd(a, modulus) == 1`. The result is
/// normalized into `[0, modulus)`.
///
/// # Errors
///
/// Returns `HybridCryptoError::NoInverse` if `a ≡ 0` or `gcd(a, modulus) != 1`.
/// Returns `HybridCryptoError::InvalidParameters` if `modulus <= 1`.
///
/// # Example
///
/// ```
/// # use hybrid_crypto::arith::mod_inverse;
/// # use num_bigint::BigUint;
/// let inv = mod_inverse(&BigUint::from(3u32), &BigUint::from(10u32)).unwrap();
/// assert_eq!(inv, BigUint::from(7u32)); // 3 * 7 = 21 = 1 mod 10
/// assert!(mod_inverse(&BigUint::from(2u32), &BigUint::from(10u32)).is_err());
/// ```
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Result<BigUint, HybridCryptoError> {
    if modulus <= &BigUint::one() {
        return Err(HybridCryptoError::InvalidParameters(format!(
            "Modulus must be greater than 1, got {}",
            modulus
        )));
    }

    let a_norm = a % modulus;
    if a_norm.is_zero() {
        return Err(HybridCryptoError::NoInverse(format!(
            "Cannot invert 0 mod {}",
            modulus
        )));
    }

    let m = BigInt::from(modulus.clone());
    let (g, x, _) = extended_gcd(&BigInt::from(a_norm.clone()), &m);
    if !g.is_one() {
        return Err(HybridCryptoError::NoInverse(format!(
            "Modular inverse does not exist for {} mod {} (gcd={})",
            a_norm, modulus, g
        )));
    }

    x.mod_floor(&m).to_biguint().ok_or_else(|| {
        HybridCryptoError::InternalError("Normalized inverse is negative".to_string())
    })
}

/// Computes `(a - b) mod modulus` without leaving unsigned arithmetic.
pub fn sub_mod(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    let a_norm = a % modulus;
    let b_norm = b % modulus;

    if a_norm >= b_norm {
        a_norm - b_norm
    } else {
        modulus - (b_norm - a_norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    fn uint(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_simple_gcd() {
        assert_eq!(gcd(&uint(1), &uint(6)), uint(1));
        assert_eq!(gcd(&uint(4), &uint(6)), uint(2));
        assert_eq!(gcd(&uint(10), &uint(0)), uint(10));
        assert_eq!(gcd(&uint(54), &uint(24)), uint(6));
    }

    #[test]
    fn test_extended_gcd_basic() {
        let (g, x, y) = extended_gcd(&big(12), &big(8));
        assert_eq!(g, big(4));
        assert_eq!(big(12) * x + big(8) * y, g);

        let (g, x, y) = extended_gcd(&big(240), &big(46));
        assert_eq!(g, big(2));
        assert_eq!(big(240) * x + big(46) * y, g);
    }

    #[test]
    fn test_extended_gcd_negative() {
        let (g, x, y) = extended_gcd(&big(-15), &big(10));
        assert_eq!(g, big(5));
        assert_eq!(big(-15) * x + big(10) * y, g);
    }

    #[test]
    fn test_extended_gcd_zero() {
        let (g, _, y) = extended_gcd(&big(0), &big(15));
        assert_eq!(g, big(15));
        assert_eq!(big(15) * y, g);
    }

    #[test]
    fn test_inversion() -> Result<(), HybridCryptoError> {
        assert_eq!(mod_inverse(&uint(5), &uint(11))?, uint(9));
        assert_eq!(mod_inverse(&uint(588), &uint(881))?, uint(442));
        // Inputs above the modulus are reduced first.
        assert_eq!(mod_inverse(&uint(16), &uint(11))?, uint(9));
        Ok(())
    }

    #[test]
    fn test_inversion_failures() {
        assert!(matches!(
            mod_inverse(&uint(0), &uint(11)),
            Err(HybridCryptoError::NoInverse(_))
        ));
        assert!(matches!(
            mod_inverse(&uint(6), &uint(9)),
            Err(HybridCryptoError::NoInverse(_))
        ));
        assert!(matches!(
            mod_inverse(&uint(3), &uint(1)),
            Err(HybridCryptoError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_sub_mod_wraps() {
        assert_eq!(sub_mod(&uint(3), &uint(5), &uint(11)), uint(9));
        assert_eq!(sub_mod(&uint(5), &uint(3), &uint(11)), uint(2));
        assert_eq!(sub_mod(&uint(14), &uint(3), &uint(11)), uint(0));
    }
}
