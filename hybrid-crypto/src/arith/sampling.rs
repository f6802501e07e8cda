//! Uniform sampling of arbitrary-precision integers from any [`rand::Rng`].

use crate::errors::HybridCryptoError;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;

/// Draws a value uniformly from `[0, bound)` by rejection sampling over the
/// bit width of `bound`.
pub fn random_below<R: Rng + ?Sized>(
    rng: &mut R,
    bound: &BigUint,
) -> Result<BigUint, HybridCryptoError> {
    if bound.is_zero() {
        return Err(HybridCryptoError::InvalidParameters(
            "Sampling bound must be positive".to_string(),
        ));
    }
    if bound.is_one() {
        return Ok(BigUint::zero());
    }

    let bits = (bound - 1u32).bits();
    let byte_len = bits.div_ceil(8) as usize;
    let excess = (byte_len as u64) * 8 - bits;
    let mut buf = vec![0u8; byte_len];

    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= 0xFFu8 >> excess;

        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Draws a value uniformly from the inclusive range `[low, high]`.
pub fn random_range_inclusive<R: Rng + ?Sized>(
    rng: &mut R,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint, HybridCryptoError> {
    if low > high {
        return Err(HybridCryptoError::InvalidParameters(format!(
            "Empty sampling range [{}, {}]",
            low, high
        )));
    }

    let span = high - low + 1u32;
    Ok(low + random_below(rng, &span)?)
}
