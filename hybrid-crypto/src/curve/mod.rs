//! # Curve Module
//!
//! Affine arithmetic on short Weierstrass curves `y² = x³ + ax + b (mod p)`.

pub mod point;

pub use point::CurvePoint;

use crate::arith::{mod_inverse, sub_mod};
use crate::errors::HybridCryptoError;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use serde::{Deserialize, Serialize};

/// A fixed curve parameter bundle shared by every party of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParameters {
    pub name: String,
    /// Prime field modulus.
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
    /// Order of the base point G.
    pub order: BigUint,
}

impl CurveParameters {
    /// Creates a curve, checking that the coefficients are reduced and that the
    /// base point lies on the curve.
    pub fn try_new(
        name: impl Into<String>,
        p: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
        order: BigUint,
    ) -> Result<Self, HybridCryptoError> {
        if p <= BigUint::from(3u32) {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "Field modulus must be a prime > 3, got {}",
                p
            )));
        }

        if a >= p || b >= p || gx >= p || gy >= p {
            return Err(HybridCryptoError::InvalidParameters(
                "Curve coefficients and base point must be reduced mod p".to_string(),
            ));
        }

        if order <= BigUint::one() {
            return Err(HybridCryptoError::InvalidParameters(format!(
                "Base point order must be > 1, got {}",
                order
            )));
        }

        let curve = Self {
            name: name.into(),
            p,
            a,
            b,
            gx,
            gy,
            order,
        };

        if !curve.is_on_curve(&curve.generator()) {
            return Err(HybridCryptoError::PointNotOnCurve);
        }

        Ok(curve)
    }

    /// The base point G.
    pub fn generator(&self) -> CurvePoint {
        CurvePoint::affine(self.gx.clone(), self.gy.clone())
    }

    /// Checks `y² ≡ x³ + ax + b (mod p)`. The point at infinity is on every curve.
    pub fn is_on_curve(&self, point: &CurvePoint) -> bool {
        match point {
            CurvePoint::Infinity => true,
            CurvePoint::Affine { x, y } => {
                if x >= &self.p || y >= &self.p {
                    return false;
                }
                let lhs = (y * y) % &self.p;
                let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
                lhs == rhs
            }
        }
    }

    /// The additive inverse `(x, -y)`.
    pub fn negate(&self, point: &CurvePoint) -> CurvePoint {
        match point {
            CurvePoint::Infinity => CurvePoint::Infinity,
            CurvePoint::Affine { x, y } => {
                CurvePoint::affine(x % &self.p, sub_mod(&BigUint::zero(), y, &self.p))
            }
        }
    }

    /// Adds two points.
    ///
    /// Uses the tangent slope `(3x² + a) / 2y` when `P = Q` and the chord slope
    /// `(y2 - y1) / (x2 - x1)` otherwise. `P + (-P)` is the point at infinity.
    pub fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> Result<CurvePoint, HybridCryptoError> {
        let (x1, y1, x2, y2) = match (lhs, rhs) {
            (CurvePoint::Infinity, _) => return Ok(rhs.clone()),
            (_, CurvePoint::Infinity) => return Ok(lhs.clone()),
            (CurvePoint::Affine { x: x1, y: y1 }, CurvePoint::Affine { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };
        let p = &self.p;

        let slope = if x1 % p == x2 % p {
            if ((y1 + y2) % p).is_zero() {
                return Ok(CurvePoint::Infinity);
            }
            if y1 % p != y2 % p {
                return Err(HybridCryptoError::PointNotOnCurve);
            }

            let numerator = (BigUint::from(3u32) * x1 * x1 + &self.a) % p;
            let denominator = (y1 << 1usize) % p;
            (numerator * mod_inverse(&denominator, p)?) % p
        } else {
            let numerator = sub_mod(y2, y1, p);
            let denominator = sub_mod(x2, x1, p);
            (numerator * mod_inverse(&denominator, p)?) % p
        };

        let x3 = sub_mod(&sub_mod(&(&slope * &slope), x1, p), x2, p);
        let y3 = sub_mod(&(&slope * sub_mod(x1, &x3, p)), y1, p);

        Ok(CurvePoint::affine(x3, y3))
    }

    pub fn double(&self, point: &CurvePoint) -> Result<CurvePoint, HybridCryptoError> {
        self.add(point, point)
    }

    /// Scalar multiplication by double-and-add, least significant bit first.
    /// A zero scalar yields the point at infinity.
    pub fn multiply(
        &self,
        point: &CurvePoint,
        scalar: &BigUint,
    ) -> Result<CurvePoint, HybridCryptoError> {
        let bits = scalar.bits();
        let mut result = CurvePoint::Infinity;
        let mut addend = point.clone();

        for i in 0..bits {
            if scalar.bit(i) {
                result = self.add(&result, &addend)?;
            }
            if i + 1 < bits {
                addend = self.double(&addend)?;
            }
        }

        Ok(result)
    }

    /// Computes `u1·G + u2·Q`.
    pub fn multiply_base_add(
        &self,
        u1: &BigUint,
        q: &CurvePoint,
        u2: &BigUint,
    ) -> Result<CurvePoint, HybridCryptoError> {
        let lhs = self.multiply(&self.generator(), u1)?;
        let rhs = self.multiply(q, u2)?;
        self.add(&lhs, &rhs)
    }
}
