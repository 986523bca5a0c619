// -*- mode: rust; -*-
//
// This file is part of trsa.

use crate::public_key::PublicKey;
use crate::verification_key::VerificationKey;

/// Public metadata produced once by the dealer and shared by every
/// participant: the public key, the threshold parameters, and the
/// verification key used to check individual signature shares.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyMeta {
    pub(crate) public_key: PublicKey,
    pub(crate) k: u16,
    pub(crate) l: u16,
    pub(crate) verification_key: VerificationKey,
}

impl KeyMeta {
    pub(crate) fn new(
        public_key: PublicKey,
        k: u16,
        l: u16,
        verification_key: VerificationKey,
    ) -> Self {
        Self {
            public_key,
            k,
            l,
            verification_key,
        }
    }

    /// The shared RSA public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The signing threshold: the minimum number of shares needed to
    /// reconstruct a signature.
    pub fn k(&self) -> u16 {
        self.k
    }

    /// The total number of shares.
    pub fn l(&self) -> u16 {
        self.l
    }

    /// The verification key used to check individual signature shares.
    pub fn verification_key(&self) -> &VerificationKey {
        &self.verification_key
    }
}
