use crate::curve::CurveParameters;
use crate::errors::HybridCryptoError;
use crate::knapsack::KnapsackParams;
use crate::preset::curves::{SECP192K1, SECP192R1};
use crate::rabbit::{Drain, Iv};

use serde::{Deserialize, Serialize};

/// Bits in a session key; the knapsack must be at least this wide.
pub const SESSION_KEY_BITS: usize = 128;

/// Which fixed curve both parties sign and verify on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveChoice {
    #[default]
    Secp192k1,
    Secp192r1,
}

impl CurveChoice {
    pub fn parameters(&self) -> CurveParameters {
        match self {
            CurveChoice::Secp192k1 => SECP192K1.clone(),
            CurveChoice::Secp192r1 => SECP192R1.clone(),
        }
    }
}

/// Settings for one exchange. Every field has a default, so `{}` is a valid
/// configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub knapsack: KnapsackParams,
    pub curve: CurveChoice,
    pub drain: Drain,
    /// IV applied to both cipher instances.
    pub iv: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            knapsack: KnapsackParams::default(),
            curve: CurveChoice::default(),
            drain: Drain::default(),
            iv: 0,
        }
    }
}

impl ExchangeConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, HybridCryptoError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, HybridCryptoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), HybridCryptoError> {
        self.knapsack.validate()?;

        if self.knapsack.length < SESSION_KEY_BITS {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "Knapsack length {} cannot carry a {}-bit session key",
                self.knapsack.length, SESSION_KEY_BITS
            )));
        }

        Ok(())
    }

    pub fn iv(&self) -> Iv {
        Iv::Integer(self.iv)
    }
}
