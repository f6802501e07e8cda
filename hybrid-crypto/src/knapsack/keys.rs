use crate::arith::{gcd, mod_inverse, random_range_inclusive};
use crate::errors::HybridCryptoError;
use crate::knapsack::{KnapsackParams, SuperincreasingSequence};

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

use serde::{Deserialize, Serialize};

/// The published half of a knapsack key pair: `public[i] = r·e_i mod q`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackPublicKey(Vec<BigUint>);

/// Receiver-owned knapsack key material.
#[derive(Clone)]
pub struct KnapsackKeyPair {
    private: SuperincreasingSequence,
    modulus: BigUint,
    multiplier: BigUint,
    multiplier_inverse: BigUint,
    public: KnapsackPublicKey,
}

impl std::fmt::Debug for KnapsackKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnapsackKeyPair")
            .field("length", &self.private.len())
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl KnapsackPublicKey {
    pub fn elements(&self) -> &[BigUint] {
        &self.0
    }

    /// Block width in bits.
    pub fn capacity(&self) -> usize {
        self.0.len()
    }

    /// Encrypts `value` as a fixed-width big-endian bit string: the most
    /// significant bit selects `public[0]`, the least significant the last element.
    ///
    /// # Errors
    ///
    /// Returns `HybridCryptoError::ValueTooWide` if `value` needs more bits than
    /// the key has elements.
    ///
    /// # Example
    ///
    /// ```
    /// # use hybrid_crypto::knapsack::{KnapsackKeyPair, SuperincreasingSequence};
    /// # use num_bigint::BigUint;
    /// let private = SuperincreasingSequence::try_from_vec(
    ///     [2u32, 7, 11, 21, 42, 89, 180, 354].map(BigUint::from).to_vec(),
    /// ).unwrap();
    /// let keys = KnapsackKeyPair::try_from_parts(private, 881u32.into(), 588u32.into()).unwrap();
    ///
    /// let cipher = keys.public_key().encrypt(&BigUint::from(0b0110_0001u32)).unwrap();
    /// assert_eq!(cipher, BigUint::from(1129u32));
    /// assert_eq!(keys.decrypt(&cipher), BigUint::from(0b0110_0001u32));
    /// ```
    pub fn encrypt(&self, value: &BigUint) -> Result<BigUint, HybridCryptoError> {
        let capacity = self.capacity();
        let bits = value.bits();
        if bits > capacity as u64 {
            return Err(HybridCryptoError::ValueTooWide { bits, capacity });
        }

        let ciphertext: BigUint = self
            .0
            .iter()
            .enumerate()
            .filter(|(i, _)| value.bit((capacity - 1 - i) as u64))
            .map(|(_, element)| element)
            .sum();

        trace!("knapsack: encrypted a {}-bit value", bits);
        Ok(ciphertext)
    }

    /// Encrypts a 128-bit session key.
    pub fn encapsulate(&self, key: u128) -> Result<BigUint, HybridCryptoError> {
        self.encrypt(&BigUint::from(key))
    }
}

impl KnapsackKeyPair {
    /// Generates a fresh key pair: private sequence, `q = sum + offset`, and a
    /// multiplier `r` resampled in `[2, q-1]` until `gcd(r, q) = 1`.
    pub fn generate<R: Rng + ?Sized>(
        params: &KnapsackParams,
        rng: &mut R,
    ) -> Result<Self, HybridCryptoError> {
        params.validate()?;

        let private = SuperincreasingSequence::generate(params.length, params.seed_max, rng)?;
        let offset = random_range_inclusive(
            rng,
            &BigUint::one(),
            &BigUint::from(params.modulus_offset_max),
        )?;
        let modulus = private.sum() + offset;

        let low = BigUint::from(2u32);
        let high = &modulus - 1u32;
        let mut attempts = 0u32;
        let multiplier = loop {
            attempts += 1;
            let candidate = random_range_inclusive(rng, &low, &high)?;
            if gcd(&candidate, &modulus).is_one() {
                break candidate;
            }
        };

        debug!(
            "knapsack: generated {}-element key pair (modulus {} bits, multiplier after {} draws)",
            private.len(),
            modulus.bits(),
            attempts
        );

        Self::assemble(private, modulus, multiplier)
    }

    /// Rebuilds a key pair from its private parts, checking `q > sum(private)`
    /// and `gcd(r, q) = 1`.
    pub fn try_from_parts(
        private: SuperincreasingSequence,
        modulus: BigUint,
        multiplier: BigUint,
    ) -> Result<Self, HybridCryptoError> {
        if modulus <= private.sum() {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "Modulus {} must exceed the private sequence sum {}",
                modulus,
                private.sum()
            )));
        }

        if multiplier < BigUint::from(2u32) || multiplier >= modulus {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "Multiplier {} must lie in [2, {}]",
                multiplier,
                &modulus - 1u32
            )));
        }

        Self::assemble(private, modulus, multiplier)
    }

    fn assemble(
        private: SuperincreasingSequence,
        modulus: BigUint,
        multiplier: BigUint,
    ) -> Result<Self, HybridCryptoError> {
        let multiplier_inverse = mod_inverse(&multiplier, &modulus)?;
        let public = private
            .elements()
            .iter()
            .map(|e| (&multiplier * e) % &modulus)
            .collect();

        Ok(Self {
            private,
            modulus,
            multiplier,
            multiplier_inverse,
            public: KnapsackPublicKey(public),
        })
    }

    pub fn public_key(&self) -> &KnapsackPublicKey {
        &self.public
    }

    pub fn private_sequence(&self) -> &SuperincreasingSequence {
        &self.private
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn multiplier(&self) -> &BigUint {
        &self.multiplier
    }

    /// Decrypts a knapsack ciphertext.
    ///
    /// `s = c·r⁻¹ mod q` is decomposed greedily from the largest private element
    /// down. Ciphertexts that were not produced by the matching public key decode
    /// to an arbitrary value; nothing signals that.
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        let elements = self.private.elements();
        let len = elements.len();

        let mut remaining = (ciphertext * &self.multiplier_inverse) % &self.modulus;
        let mut bits = vec![false; len];
        for (i, element) in elements.iter().enumerate().rev() {
            if element <= &remaining {
                bits[i] = true;
                remaining -= element;
            }
        }

        if !remaining.is_zero() {
            debug!("knapsack: ciphertext left a non-zero residue, output is not meaningful");
        }

        let mut value = BigUint::zero();
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                value.set_bit((len - 1 - i) as u64, true);
            }
        }

        value
    }

    /// Decrypts an encapsulated 128-bit session key.
    pub fn decapsulate(&self, ciphertext: &BigUint) -> Result<u128, HybridCryptoError> {
        let value = self.decrypt(ciphertext);
        value
            .to_u128()
            .ok_or(HybridCryptoError::ValueTooWide {
                bits: value.bits(),
                capacity: 128,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn textbook_keys() -> Result<KnapsackKeyPair, HybridCryptoError> {
        let private = SuperincreasingSequence::try_from_vec(
            [2u32, 7, 11, 21, 42, 89, 180, 354]
                .map(BigUint::from)
                .to_vec(),
        )?;
        KnapsackKeyPair::try_from_parts(private, 881u32.into(), 588u32.into())
    }

    #[test]
    fn test_textbook_public_key() -> Result<(), HybridCryptoError> {
        let keys = textbook_keys()?;
        let expected: Vec<BigUint> = [295u32, 592, 301, 14, 28, 353, 120, 236]
            .map(BigUint::from)
            .to_vec();
        assert_eq!(keys.public_key().elements(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn test_textbook_round_trip() -> Result<(), HybridCryptoError> {
        let keys = textbook_keys()?;
        for value in 0u32..256 {
            let value = BigUint::from(value);
            let cipher = keys.public_key().encrypt(&value)?;
            assert_eq!(keys.decrypt(&cipher), value);
        }
        Ok(())
    }

    #[test]
    fn test_generated_key_invariants() -> Result<(), HybridCryptoError> {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = KnapsackKeyPair::generate(&KnapsackParams::default(), &mut rng)?;

        assert_eq!(keys.public_key().capacity(), 128);
        assert!(keys.modulus() > &keys.private_sequence().sum());
        assert!(gcd(keys.multiplier(), keys.modulus()).is_one());
        for (e, p) in keys
            .private_sequence()
            .elements()
            .iter()
            .zip(keys.public_key().elements())
        {
            assert_eq!(&((keys.multiplier() * e) % keys.modulus()), p);
        }
        Ok(())
    }

    #[test]
    fn test_session_key_round_trip() -> Result<(), HybridCryptoError> {
        let mut rng = StdRng::seed_from_u64(9);
        let keys = KnapsackKeyPair::generate(&KnapsackParams::default(), &mut rng)?;

        for key in [0u128, 1, u128::MAX, 0x0f01dbd6d2ea452fb64730c544269f44] {
            let cipher = keys.public_key().encapsulate(key)?;
            assert_eq!(keys.decapsulate(&cipher)?, key);
        }
        Ok(())
    }

    #[test]
    fn test_too_wide_value_rejected() -> Result<(), HybridCryptoError> {
        let keys = textbook_keys()?;
        let result = keys.public_key().encrypt(&BigUint::from(256u32));
        assert!(matches!(
            result,
            Err(HybridCryptoError::ValueTooWide {
                bits: 9,
                capacity: 8
            })
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_parts_rejected() -> Result<(), HybridCryptoError> {
        let private = SuperincreasingSequence::try_from_vec(
            [2u32, 7, 11].map(BigUint::from).to_vec(),
        )?;
        // q must exceed the sum (20).
        assert!(KnapsackKeyPair::try_from_parts(private.clone(), 20u32.into(), 3u32.into()).is_err());
        // r must be coprime to q.
        assert!(matches!(
            KnapsackKeyPair::try_from_parts(private, 21u32.into(), 6u32.into()),
            Err(HybridCryptoError::NoInverse(_))
        ));
        Ok(())
    }
}
