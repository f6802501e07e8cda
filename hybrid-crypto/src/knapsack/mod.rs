//! # Knapsack Module
//!
//! Merkle–Hellman additive knapsack used to encapsulate the 128-bit session key.
//! The private key is a superincreasing sequence disguised as the public key by
//! modular multiplication `public[i] = r·e_i mod q`.

pub mod keys;
pub mod sequence;

pub use keys::{KnapsackKeyPair, KnapsackPublicKey};
pub use sequence::{SuperincreasingSequence, generate_superincreasing_sequence};

use crate::errors::HybridCryptoError;

use serde::{Deserialize, Serialize};

/// Sequence length used by the reference exchange; also the session key width.
pub const DEFAULT_LENGTH: usize = 128;
/// Upper bound of the first sequence element, drawn from `[1, SEED_MAX]`.
pub const SEED_MAX: u64 = 1000;
/// Upper bound of the random offset added to the sequence sum to form `q`.
pub const MODULUS_OFFSET_MAX: u64 = 1000;

/// Parameters for knapsack key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnapsackParams {
    /// Number of sequence elements, i.e. the plaintext width in bits.
    pub length: usize,
    pub seed_max: u64,
    pub modulus_offset_max: u64,
}

impl Default for KnapsackParams {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            seed_max: SEED_MAX,
            modulus_offset_max: MODULUS_OFFSET_MAX,
        }
    }
}

impl KnapsackParams {
    pub fn validate(&self) -> Result<(), HybridCryptoError> {
        if self.length == 0 {
            return Err(HybridCryptoError::InvalidParameters(
                "Knapsack length must be > 0".to_string(),
            ));
        }

        if self.seed_max == 0 || self.modulus_offset_max == 0 {
            return Err(HybridCryptoError::InvalidParameters(
                "Knapsack sampling bounds must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}
