//! # ECDSA Module
//!
//! Signatures over a [`CurveParameters`] bundle with SHA-256 message digests.

use crate::arith::{mod_inverse, random_range_inclusive};
use crate::curve::{CurveParameters, CurvePoint};
use crate::errors::HybridCryptoError;

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;
use sha2::{Digest, Sha256};

use serde::{Deserialize, Serialize};

/// An ECDSA signature `(r, s)`, both reduced mod the curve order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

/// A signing scalar together with its public point `d·G`.
#[derive(Clone)]
pub struct SignatureKeyPair {
    private: BigUint,
    public: CurvePoint,
}

impl std::fmt::Debug for SignatureKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl SignatureKeyPair {
    pub fn public_key(&self) -> &CurvePoint {
        &self.public
    }
}

/// Signing and verification bound to one curve.
#[derive(Debug, Clone)]
pub struct Ecdsa {
    curve: CurveParameters,
}

impl Ecdsa {
    pub fn new(curve: CurveParameters) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &CurveParameters {
        &self.curve
    }

    /// Draws a private scalar uniformly from `[1, n-1]`.
    pub fn generate_key_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SignatureKeyPair, HybridCryptoError> {
        let private = self.random_scalar(rng)?;
        let keys = self.key_pair_from_private(private)?;
        debug!("ecdsa: generated key pair on {}", self.curve.name);
        Ok(keys)
    }

    /// Rebuilds a key pair from a known private scalar in `[1, n-1]`.
    pub fn key_pair_from_private(
        &self,
        private: BigUint,
    ) -> Result<SignatureKeyPair, HybridCryptoError> {
        self.check_scalar(&private, "private scalar")?;
        let public = self.curve.multiply(&self.curve.generator(), &private)?;
        Ok(SignatureKeyPair { private, public })
    }

    /// SHA-256 of `message`, read big-endian and reduced mod n.
    pub fn hash_message(&self, message: &[u8]) -> BigUint {
        let digest = Sha256::digest(message);
        BigUint::from_bytes_be(&digest) % &self.curve.order
    }

    /// Signs `message` with a fresh random nonce.
    ///
    /// Nonces that would give `r = 0` or `s = 0` are discarded and redrawn.
    pub fn sign<R: Rng + ?Sized>(
        &self,
        keys: &SignatureKeyPair,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature, HybridCryptoError> {
        loop {
            let nonce = self.random_scalar(rng)?;
            match self.sign_with_nonce(keys, message, &nonce) {
                Err(HybridCryptoError::DegenerateSignature | HybridCryptoError::NoInverse(_)) => {
                    trace!("ecdsa: discarded a degenerate nonce");
                }
                result => return result,
            }
        }
    }

    /// Signs `message` with a caller-chosen nonce `k`.
    ///
    /// # Errors
    ///
    /// Returns `HybridCryptoError::DegenerateSignature` when `r` or `s` is zero and
    /// `HybridCryptoError::InvalidParameters` when `k` is outside `[1, n-1]`.
    pub fn sign_with_nonce(
        &self,
        keys: &SignatureKeyPair,
        message: &[u8],
        nonce: &BigUint,
    ) -> Result<Signature, HybridCryptoError> {
        self.check_scalar(nonce, "nonce")?;
        let n = &self.curve.order;

        let z = self.hash_message(message);
        let nonce_inverse = mod_inverse(nonce, n)?;

        let point = self.curve.multiply(&self.curve.generator(), nonce)?;
        let r = match point.x() {
            Some(x) => x % n,
            None => return Err(HybridCryptoError::DegenerateSignature),
        };
        if r.is_zero() {
            return Err(HybridCryptoError::DegenerateSignature);
        }

        let s = (nonce_inverse * (z + &r * &keys.private)) % n;
        if s.is_zero() {
            return Err(HybridCryptoError::DegenerateSignature);
        }

        Ok(Signature { r, s })
    }

    /// Verifies `signature` over `message` against a public point.
    ///
    /// Malformed input (zero components, a public key off the curve) is a
    /// rejection, not an error.
    pub fn verify(&self, public: &CurvePoint, message: &[u8], signature: &Signature) -> bool {
        let n = &self.curve.order;

        if public.is_infinity() || !self.curve.is_on_curve(public) {
            debug!("ecdsa: public key is not a valid curve point");
            return false;
        }

        let r = &signature.r % n;
        let s = &signature.s % n;
        if r.is_zero() || s.is_zero() {
            return false;
        }

        let w = match mod_inverse(&s, n) {
            Ok(w) => w,
            Err(_) => return false,
        };
        let z = self.hash_message(message);
        let u1 = (z * &w) % n;
        let u2 = (&r * &w) % n;

        let point = match self.curve.multiply_base_add(&u1, public, &u2) {
            Ok(point) => point,
            Err(_) => return false,
        };

        match point.x() {
            Some(x) => x % n == r,
            None => false,
        }
    }

    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BigUint, HybridCryptoError> {
        random_range_inclusive(rng, &BigUint::one(), &(&self.curve.order - 1u32))
    }

    fn check_scalar(&self, scalar: &BigUint, what: &str) -> Result<(), HybridCryptoError> {
        if scalar.is_zero() || scalar >= &self.curve.order {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "{} must lie in [1, n-1]",
                what
            )));
        }
        Ok(())
    }
}
