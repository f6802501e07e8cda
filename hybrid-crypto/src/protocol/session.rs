use crate::errors::HybridCryptoError;
use crate::rabbit::CipherKey;

use rand::Rng;

/// A 128-bit symmetric session key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SessionKey(u128);

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

impl SessionKey {
    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random())
    }

    /// Parses up to 32 hex digits, with or without a `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, HybridCryptoError> {
        let digits = text.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);

        if digits.is_empty() || digits.len() > 32 {
            return Err(HybridCryptoError::InvalidKeyEncoding(format!(
                "Expected 1 to 32 hex digits, got {}",
                digits.len()
            )));
        }

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HybridCryptoError::InvalidKeyEncoding(
                "Session key contains a non-hex character".to_string(),
            ));
        }

        u128::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| HybridCryptoError::InvalidKeyEncoding(e.to_string()))
    }

    pub fn to_hex(&self) -> String {
        format!("{:032x}", self.0)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn cipher_key(&self) -> CipherKey {
        CipherKey::Integer(self.0)
    }
}
