#[derive(thiserror::Error, Debug)]
pub enum HybridCryptoError {
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, m) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),
    #[error("InternalError: {0}")]
    InternalError(String),

    /// A value does not fit in the fixed bit width of a knapsack key.
    #[error("Value of {bits} bits does not fit in a {capacity}-bit knapsack block")]
    ValueTooWide { bits: u64, capacity: usize },
    #[error("Cipher key must be at most 16 bytes, got {0}")]
    KeyTooLong(usize),
    #[error("IV must be at most 8 bytes, got {0}")]
    IvTooLong(usize),
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Point is not on the curve")]
    PointNotOnCurve,
    #[error("Nonce produced a degenerate signature (r = 0 or s = 0)")]
    DegenerateSignature,

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
