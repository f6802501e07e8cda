//! # Hybrid Crypto
//!
//! A hybrid exchange built from three engines:
//!
//! - [`knapsack`]: Merkle–Hellman key encapsulation of the session key,
//! - [`curve`] and [`ecdsa`]: signatures over a 192-bit curve,
//! - [`rabbit`]: the Rabbit stream cipher for the message body,
//!
//! composed by [`protocol`] into one authenticated, confidential transfer.

pub mod arith;
pub mod curve;
pub mod ecdsa;
pub mod errors;
pub mod knapsack;
pub mod preset;
pub mod protocol;
pub mod rabbit;

pub use errors::HybridCryptoError;
pub use protocol::{
    Envelope, ExchangeConfig, ExchangeOutcome, Opened, ReceiverIdentity, SenderIdentity,
    SessionKey, exchange,
};
