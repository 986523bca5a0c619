// -*- mode: rust; -*-
//
// This file is part of trsa.

use num_bigint::BigUint;

/// The RSA public key shared by every participant: `n = p*q`, both `p` and
/// `q` safe primes, and a public exponent `e`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

impl PublicKey {
    pub(crate) fn new(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }

    /// The RSA modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Byte length of `n`, i.e. the size of any signature or encoded
    /// document hash produced for this key.
    pub fn size(&self) -> usize {
        self.n.to_bytes_be().len()
    }
}
