use crate::curve::CurveParameters;

use lazy_static::lazy_static;
use num_bigint::BigUint;

fn hex(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 16).expect("preset constants are valid hex")
}

lazy_static! {
    /// SEC 2 `secp192k1`: y² = x³ + 3 over a 192-bit prime field.
    pub static ref SECP192K1: CurveParameters = CurveParameters {
        name: "secp192k1".to_string(),
        p: hex("fffffffffffffffffffffffffffffffffffffffeffffee37"),
        a: hex("0"),
        b: hex("3"),
        gx: hex("db4ff10ec057e9ae26b07d0280b7f4341da5d1b1eae06c7d"),
        gy: hex("9b2f2f6d9c5628a7844163d015be86344082aa88d95e2f9d"),
        order: hex("fffffffffffffffffffffffe26f2fc170f69466a74defd8d"),
    };

    /// SEC 2 `secp192r1` (NIST P-192): y² = x³ - 3x + b.
    pub static ref SECP192R1: CurveParameters = CurveParameters {
        name: "secp192r1".to_string(),
        p: hex("fffffffffffffffffffffffffffffffeffffffffffffffff"),
        a: hex("fffffffffffffffffffffffffffffffefffffffffffffffc"),
        b: hex("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
        gx: hex("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
        gy: hex("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
        order: hex("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
    };
}
