use crate::ecdsa::Signature;
use crate::errors::HybridCryptoError;

use num_bigint::BigUint;

use serde::{Deserialize, Serialize};

/// Everything the sender hands to the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Rabbit ciphertext of the message.
    #[serde(with = "base64_bytes")]
    pub ciphertext: Vec<u8>,
    /// Knapsack ciphertext of the session key.
    pub encapsulated_key: BigUint,
    /// Signature over the plaintext message.
    pub signature: Signature,
}

impl Envelope {
    pub fn to_json(&self) -> Result<String, HybridCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, HybridCryptoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lowercase hex of the ciphertext, for display.
    pub fn ciphertext_hex(&self) -> String {
        hex::encode(&self.ciphertext)
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
