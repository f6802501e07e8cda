use crate::arith::random_range_inclusive;
use crate::errors::HybridCryptoError;
use crate::knapsack::SEED_MAX;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;

use serde::{Deserialize, Serialize};

/// An ordered sequence where every element exceeds the sum of all previous ones.
///
/// Instances only come out of [`SuperincreasingSequence::generate`] or the
/// validating [`SuperincreasingSequence::try_from_vec`], so the invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BigUint>", into = "Vec<BigUint>")]
pub struct SuperincreasingSequence(Vec<BigUint>);

impl SuperincreasingSequence {
    /// Builds a sequence of `length` elements: the first uniform in `[1, seed_max]`,
    /// every following one uniform in `[sum + 1, 2·sum]`.
    pub fn generate<R: Rng + ?Sized>(
        length: usize,
        seed_max: u64,
        rng: &mut R,
    ) -> Result<Self, HybridCryptoError> {
        if length == 0 || seed_max == 0 {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "Cannot generate a sequence of length {} with seed bound {}",
                length, seed_max
            )));
        }

        let mut elements = Vec::with_capacity(length);
        let first = random_range_inclusive(rng, &BigUint::from(1u32), &BigUint::from(seed_max))?;
        let mut sum = first.clone();
        elements.push(first);

        for _ in 1..length {
            let low = &sum + 1u32;
            let high = &sum << 1usize;
            let next = random_range_inclusive(rng, &low, &high)?;
            sum += &next;
            elements.push(next);
        }

        Ok(Self(elements))
    }

    /// Wraps an existing sequence after checking it is positive and superincreasing.
    pub fn try_from_vec(elements: Vec<BigUint>) -> Result<Self, HybridCryptoError> {
        if elements.is_empty() {
            return Err(HybridCryptoError::InvalidParameters(
                "Sequence must not be empty".to_string(),
            ));
        }

        let mut sum = BigUint::zero();
        for (i, element) in elements.iter().enumerate() {
            if element.is_zero() || element <= &sum {
                return Err(HybridCryptoError::InvalidParameters(format!(
                    "Element {} ({}) does not exceed the sum of its predecessors ({})",
                    i, element, sum
                )));
            }
            sum += element;
        }

        Ok(Self(elements))
    }

    pub fn elements(&self) -> &[BigUint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> BigUint {
        self.0.iter().sum()
    }
}

impl TryFrom<Vec<BigUint>> for SuperincreasingSequence {
    type Error = HybridCryptoError;

    fn try_from(elements: Vec<BigUint>) -> Result<Self, Self::Error> {
        Self::try_from_vec(elements)
    }
}

impl From<SuperincreasingSequence> for Vec<BigUint> {
    fn from(sequence: SuperincreasingSequence) -> Self {
        sequence.0
    }
}

/// Generates a superincreasing sequence with the default first-element bound.
pub fn generate_superincreasing_sequence<R: Rng + ?Sized>(
    length: usize,
    rng: &mut R,
) -> Result<SuperincreasingSequence, HybridCryptoError> {
    SuperincreasingSequence::generate(length, SEED_MAX, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seq(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn test_generated_sequence_is_superincreasing() -> Result<(), HybridCryptoError> {
        let mut rng = StdRng::seed_from_u64(2024);
        let sequence = generate_superincreasing_sequence(128, &mut rng)?;
        assert_eq!(sequence.len(), 128);

        let first = &sequence.elements()[0];
        assert!(first >= &BigUint::from(1u32) && first <= &BigUint::from(SEED_MAX));

        let mut prefix = BigUint::zero();
        for element in sequence.elements() {
            assert!(element > &prefix);
            // Each step at most doubles the running sum.
            if !prefix.is_zero() {
                assert!(element <= &(&prefix << 1usize));
            }
            prefix += element;
        }
        Ok(())
    }

    #[test]
    fn test_try_from_vec() {
        assert!(SuperincreasingSequence::try_from_vec(seq(&[2, 7, 11, 21, 42, 89, 180, 354])).is_ok());
        assert!(SuperincreasingSequence::try_from_vec(seq(&[2, 7, 9])).is_err());
        assert!(SuperincreasingSequence::try_from_vec(seq(&[0, 1])).is_err());
        assert!(SuperincreasingSequence::try_from_vec(Vec::new()).is_err());
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_superincreasing_sequence(0, &mut rng).is_err());
    }

    #[test]
    fn test_serde_revalidates() {
        let json = "[[2],[7],[9]]";
        assert!(serde_json::from_str::<SuperincreasingSequence>(json).is_err());

        let json = "[[2],[7],[11]]";
        let parsed: SuperincreasingSequence = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.elements(), seq(&[2, 7, 11]).as_slice());
    }
}
