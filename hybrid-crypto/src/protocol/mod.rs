//! # Protocol Module
//!
//! Two-party hybrid exchange:
//!
//! 1. the receiver publishes a knapsack public key,
//! 2. the sender holds an ECDSA key pair on the shared curve,
//! 3. the sender Rabbit-encrypts the message under a 128-bit session key,
//! 4. knapsack-encapsulates that session key for the receiver,
//! 5. and signs the plaintext;
//! 6. the [`Envelope`] travels to the receiver, who
//! 7. decapsulates the session key,
//! 8. decrypts the message,
//! 9. and verifies the signature over the recovered plaintext.

pub mod config;
pub mod envelope;
pub mod session;

pub use config::{CurveChoice, ExchangeConfig};
pub use envelope::Envelope;
pub use session::SessionKey;

use crate::curve::{CurveParameters, CurvePoint};
use crate::ecdsa::{Ecdsa, Signature, SignatureKeyPair};
use crate::errors::HybridCryptoError;
use crate::knapsack::{KnapsackKeyPair, KnapsackPublicKey};
use crate::rabbit::Rabbit;

use log::{debug, info, warn};
use rand::Rng;

/// The signing party. Owns its signature key pair; never sees knapsack secrets.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    ecdsa: Ecdsa,
    signature_keys: SignatureKeyPair,
}

/// The decrypting party. Owns its knapsack key pair and verifies on the shared curve.
#[derive(Debug, Clone)]
pub struct ReceiverIdentity {
    ecdsa: Ecdsa,
    knapsack_keys: KnapsackKeyPair,
}

/// What the receiver recovers from an [`Envelope`].
///
/// The plaintext is returned whether or not the signature checked out; callers
/// decide what to do with an unverified message.
#[derive(Debug, Clone)]
pub struct Opened {
    pub plaintext: Vec<u8>,
    pub session_key: SessionKey,
    pub verified: bool,
}

/// Result of running both sides of an exchange in one process.
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    pub envelope: Envelope,
    pub sender_public: CurvePoint,
    pub opened: Opened,
}

impl SenderIdentity {
    pub fn generate<R: Rng + ?Sized>(
        curve: CurveParameters,
        rng: &mut R,
    ) -> Result<Self, HybridCryptoError> {
        let ecdsa = Ecdsa::new(curve);
        let signature_keys = ecdsa.generate_key_pair(rng)?;
        Ok(Self {
            ecdsa,
            signature_keys,
        })
    }

    pub fn from_keys(ecdsa: Ecdsa, signature_keys: SignatureKeyPair) -> Self {
        Self {
            ecdsa,
            signature_keys,
        }
    }

    pub fn public_key(&self) -> &CurvePoint {
        self.signature_keys.public_key()
    }

    pub fn sign<R: Rng + ?Sized>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature, HybridCryptoError> {
        self.ecdsa.sign(&self.signature_keys, message, rng)
    }

    /// Encrypts, encapsulates the session key for `receiver` and signs the plaintext.
    pub fn seal<R: Rng + ?Sized>(
        &self,
        message: &[u8],
        session_key: &SessionKey,
        receiver: &KnapsackPublicKey,
        config: &ExchangeConfig,
        rng: &mut R,
    ) -> Result<Envelope, HybridCryptoError> {
        let mut cipher =
            Rabbit::with_drain(&session_key.cipher_key(), Some(&config.iv()), config.drain)?;
        let ciphertext = cipher.encrypt(message);
        debug!("sender: encrypted {} bytes", ciphertext.len());

        let encapsulated_key = receiver.encapsulate(session_key.value())?;
        debug!(
            "sender: encapsulated session key ({} bit ciphertext)",
            encapsulated_key.bits()
        );

        let signature = self.sign(message, rng)?;
        debug!("sender: signed plaintext");

        Ok(Envelope {
            ciphertext,
            encapsulated_key,
            signature,
        })
    }
}

impl ReceiverIdentity {
    pub fn generate<R: Rng + ?Sized>(
        config: &ExchangeConfig,
        rng: &mut R,
    ) -> Result<Self, HybridCryptoError> {
        config.validate()?;
        let knapsack_keys = KnapsackKeyPair::generate(&config.knapsack, rng)?;
        Ok(Self {
            ecdsa: Ecdsa::new(config.curve.parameters()),
            knapsack_keys,
        })
    }

    pub fn from_keys(ecdsa: Ecdsa, knapsack_keys: KnapsackKeyPair) -> Self {
        Self {
            ecdsa,
            knapsack_keys,
        }
    }

    pub fn public_key(&self) -> &KnapsackPublicKey {
        self.knapsack_keys.public_key()
    }

    pub fn verify(&self, sender: &CurvePoint, message: &[u8], signature: &Signature) -> bool {
        self.ecdsa.verify(sender, message, signature)
    }

    /// Recovers the session key, decrypts the message and checks the sender's signature.
    pub fn open(
        &self,
        envelope: &Envelope,
        sender: &CurvePoint,
        config: &ExchangeConfig,
    ) -> Result<Opened, HybridCryptoError> {
        let session_key = SessionKey::new(self.knapsack_keys.decapsulate(&envelope.encapsulated_key)?);
        debug!("receiver: recovered session key");

        let mut cipher =
            Rabbit::with_drain(&session_key.cipher_key(), Some(&config.iv()), config.drain)?;
        let plaintext = cipher.decrypt(&envelope.ciphertext);
        debug!("receiver: decrypted {} bytes", plaintext.len());

        let verified = self.verify(sender, &plaintext, &envelope.signature);
        if verified {
            debug!("receiver: signature verified");
        } else {
            warn!("receiver: signature verification failed");
        }

        Ok(Opened {
            plaintext,
            session_key,
            verified,
        })
    }
}

/// Runs both roles with freshly generated identities.
pub fn exchange<R: Rng + ?Sized>(
    message: &[u8],
    session_key: &SessionKey,
    config: &ExchangeConfig,
    rng: &mut R,
) -> Result<ExchangeOutcome, HybridCryptoError> {
    config.validate()?;

    let receiver = ReceiverIdentity::generate(config, rng)?;
    let sender = SenderIdentity::generate(config.curve.parameters(), rng)?;
    info!(
        "exchange: {}-bit knapsack, curve {:?}, drain {:?}",
        receiver.public_key().capacity(),
        config.curve,
        config.drain
    );

    let envelope = sender.seal(message, session_key, receiver.public_key(), config, rng)?;
    let opened = receiver.open(&envelope, sender.public_key(), config)?;
    info!("exchange: verified = {}", opened.verified);

    Ok(ExchangeOutcome {
        envelope,
        sender_public: sender.public_key().clone(),
        opened,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SESSION_KEY: u128 = 0x0f01dbd6d2ea452fb64730c544269f44;

    #[test]
    fn test_seal_and_open() -> Result<(), HybridCryptoError> {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ExchangeConfig::default();

        let receiver = ReceiverIdentity::generate(&config, &mut rng)?;
        let sender = SenderIdentity::generate(config.curve.parameters(), &mut rng)?;
        let session_key = SessionKey::new(SESSION_KEY);

        let envelope = sender.seal(
            b"Hello, world!",
            &session_key,
            receiver.public_key(),
            &config,
            &mut rng,
        )?;
        assert_eq!(envelope.ciphertext_hex(), "74af9e2893d7ab226cf030a692");

        let opened = receiver.open(&envelope, sender.public_key(), &config)?;
        assert_eq!(opened.session_key, session_key);
        assert_eq!(opened.plaintext, b"Hello, world!");
        assert!(opened.verified);
        Ok(())
    }

    #[test]
    fn test_wrong_sender_still_yields_plaintext() -> Result<(), HybridCryptoError> {
        let mut rng = StdRng::seed_from_u64(2);
        let config = ExchangeConfig::default();

        let receiver = ReceiverIdentity::generate(&config, &mut rng)?;
        let sender = SenderIdentity::generate(config.curve.parameters(), &mut rng)?;
        let impostor = SenderIdentity::generate(config.curve.parameters(), &mut rng)?;

        let envelope = sender.seal(
            b"payload",
            &SessionKey::generate(&mut rng),
            receiver.public_key(),
            &config,
            &mut rng,
        )?;
        let opened = receiver.open(&envelope, impostor.public_key(), &config)?;
        assert_eq!(opened.plaintext, b"payload");
        assert!(!opened.verified);
        Ok(())
    }

    #[test]
    fn test_exchange_with_alternate_settings() -> Result<(), HybridCryptoError> {
        let mut rng = StdRng::seed_from_u64(3);
        let config = ExchangeConfig::from_json(
            r#"{ "knapsack": { "length": 144 }, "curve": "secp192r1", "drain": "single_bit", "iv": 99 }"#,
        )?;

        let outcome = exchange(
            "Grüße aus der Mitte".as_bytes(),
            &SessionKey::generate(&mut rng),
            &config,
            &mut rng,
        )?;
        assert_eq!(outcome.opened.plaintext, "Grüße aus der Mitte".as_bytes());
        assert!(outcome.opened.verified);
        Ok(())
    }
}
