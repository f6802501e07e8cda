use crate::errors::HybridCryptoError;

use serde::{Deserialize, Serialize};

/// Key material accepted by [`Rabbit`](super::Rabbit).
///
/// Byte strings are read big-endian and left-padded with zeros to 16 bytes, so
/// `Bytes(b"abc")` and `Integer(0x616263)` are the same key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherKey {
    Integer(u128),
    Bytes(Vec<u8>),
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CipherKey(..)")
    }
}

impl CipherKey {
    /// The key as one 128-bit integer.
    pub fn value(&self) -> Result<u128, HybridCryptoError> {
        match self {
            CipherKey::Integer(value) => Ok(*value),
            CipherKey::Bytes(bytes) => {
                if bytes.len() > 16 {
                    return Err(HybridCryptoError::KeyTooLong(bytes.len()));
                }
                let mut padded = [0u8; 16];
                padded[16 - bytes.len()..].copy_from_slice(bytes);
                Ok(u128::from_be_bytes(padded))
            }
        }
    }

    /// Splits the key into eight 16-bit words, `k[0]` being the least significant.
    pub fn words(&self) -> Result<[u16; 8], HybridCryptoError> {
        let value = self.value()?;
        Ok(std::array::from_fn(|i| (value >> (16 * i)) as u16))
    }
}

impl From<u128> for CipherKey {
    fn from(value: u128) -> Self {
        CipherKey::Integer(value)
    }
}

impl From<&[u8]> for CipherKey {
    fn from(bytes: &[u8]) -> Self {
        CipherKey::Bytes(bytes.to_vec())
    }
}

impl From<&str> for CipherKey {
    fn from(text: &str) -> Self {
        CipherKey::Bytes(text.as_bytes().to_vec())
    }
}

/// A 64-bit initialization vector, given as an integer or up to 8 big-endian bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Iv {
    Integer(u64),
    Bytes(Vec<u8>),
}

impl Iv {
    pub fn value(&self) -> Result<u64, HybridCryptoError> {
        match self {
            Iv::Integer(value) => Ok(*value),
            Iv::Bytes(bytes) => {
                if bytes.len() > 8 {
                    return Err(HybridCryptoError::IvTooLong(bytes.len()));
                }
                Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
            }
        }
    }

    /// Expands the IV into the four counter masks `[i0, i1, i2, i3]`.
    pub fn counter_masks(&self) -> Result<[u32; 4], HybridCryptoError> {
        let iv = self.value()?;
        let i0 = iv as u32;
        let i2 = (iv >> 32) as u32;
        let i1 = (i0 >> 16) | (i2 & 0xFFFF_0000);
        let i3 = (i2 << 16) | (i0 & 0x0000_FFFF);
        Ok([i0, i1, i2, i3])
    }
}

impl From<u64> for Iv {
    fn from(value: u64) -> Self {
        Iv::Integer(value)
    }
}

impl From<&[u8]> for Iv {
    fn from(bytes: &[u8]) -> Self {
        Iv::Bytes(bytes.to_vec())
    }
}
