//! # Rabbit Module
//!
//! The Rabbit stream cipher: a 513-bit internal state (eight state words,
//! eight counter words, one carry bit) producing 128 bits of keystream per round.
//!
//! Lifecycle: the key schedule runs four rounds and folds the state into the
//! counters; the result is kept as the reset point. An IV is mixed into the
//! counters and followed by four more rounds. Keystream is then drained byte by
//! byte, refilled with a new block every 16 bytes.

pub mod key;
pub mod state;

pub use key::{CipherKey, Iv};
pub use state::CipherState;

use crate::errors::HybridCryptoError;

use log::trace;

use serde::{Deserialize, Serialize};

const WARMUP_ROUNDS: usize = 4;
const BLOCK_BYTES: u8 = 16;

/// How the 128-bit output block is consumed between refills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drain {
    /// Each byte is the next least-significant octet of the block (RFC 4503 order).
    #[default]
    Octet,
    /// The block shifts by a single bit per emitted byte. Interoperates with
    /// streams produced by implementations that drain this way.
    SingleBit,
}

impl Drain {
    fn shift(self) -> u32 {
        match self {
            Drain::Octet => 8,
            Drain::SingleBit => 1,
        }
    }
}

/// A keyed Rabbit instance. Keystream generation mutates it, so one instance
/// serves one sequential stream.
#[derive(Clone)]
pub struct Rabbit {
    state: CipherState,
    start: CipherState,
    buffer: u128,
    buffered: u8,
    drain: Drain,
}

impl std::fmt::Debug for Rabbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rabbit")
            .field("drain", &self.drain)
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}

impl Rabbit {
    /// Runs the key schedule and, when given, the IV schedule.
    ///
    /// # Example
    ///
    /// ```
    /// # use hybrid_crypto::rabbit::{CipherKey, Iv, Rabbit};
    /// let key = CipherKey::Integer(0x0f01dbd6d2ea452fb64730c544269f44);
    /// let iv = Iv::Integer(0);
    ///
    /// let ciphertext = Rabbit::new(&key, Some(&iv)).unwrap().encrypt(b"Hello, world!");
    /// let plaintext = Rabbit::new(&key, Some(&iv)).unwrap().decrypt(&ciphertext);
    /// assert_eq!(plaintext, b"Hello, world!");
    /// ```
    pub fn new(key: &CipherKey, iv: Option<&Iv>) -> Result<Self, HybridCryptoError> {
        Self::with_drain(key, iv, Drain::default())
    }

    pub fn with_drain(
        key: &CipherKey,
        iv: Option<&Iv>,
        drain: Drain,
    ) -> Result<Self, HybridCryptoError> {
        let mut state = CipherState::from_key_words(&key.words()?);
        for _ in 0..WARMUP_ROUNDS {
            state.advance();
        }
        for j in 0..8 {
            state.c[j] ^= state.x[(j + 4) % 8];
        }

        let mut rabbit = Self {
            state,
            start: state,
            buffer: 0,
            buffered: 0,
            drain,
        };
        trace!("rabbit: key schedule complete");

        if let Some(iv) = iv {
            rabbit.set_iv(iv)?;
        }

        Ok(rabbit)
    }

    pub fn drain(&self) -> Drain {
        self.drain
    }

    /// XORs the IV masks into both halves of the counter words and runs four rounds.
    pub fn set_iv(&mut self, iv: &Iv) -> Result<(), HybridCryptoError> {
        let masks = iv.counter_masks()?;
        for (j, counter) in self.state.c.iter_mut().enumerate() {
            *counter ^= masks[j % 4];
        }
        for _ in 0..WARMUP_ROUNDS {
            self.state.advance();
        }
        Ok(())
    }

    /// Restores the post-key-schedule state, drops buffered keystream and
    /// optionally applies a new IV.
    pub fn reset(&mut self, iv: Option<&Iv>) -> Result<(), HybridCryptoError> {
        self.state = self.start;
        self.buffer = 0;
        self.buffered = 0;

        if let Some(iv) = iv {
            self.set_iv(iv)?;
        }
        Ok(())
    }

    /// Advances the state by one round and returns the derived block.
    pub fn next_block(&mut self) -> u128 {
        self.state.advance();
        self.state.derive()
    }

    fn next_byte(&mut self) -> u8 {
        if self.buffered == 0 {
            self.buffer = self.next_block();
            self.buffered = BLOCK_BYTES;
        }

        let byte = self.buffer as u8;
        self.buffer >>= self.drain.shift();
        self.buffered -= 1;
        byte
    }

    /// Produces the next `n` keystream bytes.
    pub fn keystream(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.next_byte()).collect()
    }

    /// XORs keystream into `data` in place.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_byte();
        }
    }

    /// Encrypts `data`. Encryption and decryption are the same operation.
    pub fn encrypt(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        self.apply_keystream(&mut out);
        out
    }

    pub fn decrypt(&mut self, data: &[u8]) -> Vec<u8> {
        self.encrypt(data)
    }
}
