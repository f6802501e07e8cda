use num_bigint::BigUint;

use serde::{Deserialize, Serialize};

/// A curve point in affine coordinates, or the group identity.
///
/// Points are values: every curve operation returns a new point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurvePoint {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl CurvePoint {
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        CurvePoint::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, CurvePoint::Infinity)
    }

    pub fn x(&self) -> Option<&BigUint> {
        match self {
            CurvePoint::Infinity => None,
            CurvePoint::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&BigUint> {
        match self {
            CurvePoint::Infinity => None,
            CurvePoint::Affine { y, .. } => Some(y),
        }
    }
}

impl std::fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurvePoint::Infinity => write!(f, "(infinity)"),
            CurvePoint::Affine { x, y } => write!(f, "({:x}, {:x})", x, y),
        }
    }
}
