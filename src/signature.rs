// -*- mode: rust; -*-
//
// This file is part of trsa.

use num_bigint::BigUint;

use crate::public_key::PublicKey;

/// A standard RSA PKCS#1 v1.5 signature: a big-endian byte string of length
/// `PublicKey::size()`, left-zero-padded.
#[derive(Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature(Vec<u8>);

impl Signature {
    pub(crate) fn from_biguint(y: &BigUint, len: usize) -> Self {
        let mut bytes = y.to_bytes_be();
        debug_assert!(
            bytes.len() <= len,
            "signature integer longer than modulus size"
        );
        if bytes.len() < len {
            let mut padded = vec![0u8; len - bytes.len()];
            padded.append(&mut bytes);
            bytes = padded;
        }
        Signature(bytes)
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the signature, returning its raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Checks this signature as a standard RSA PKCS#1 v1.5 signature: is
    /// `signature^e mod n` equal to the integer represented by
    /// `prepared_digest` (the output of
    /// [`crate::digest_info::prepare_document_hash`])?
    ///
    /// Any standard RSA library can perform this same check directly; this
    /// method exists so the core can verify its own output (used by the
    /// combiner's internal consistency check) without a second dependency.
    pub fn verify(&self, prepared_digest: &[u8], public_key: &PublicKey) -> bool {
        let y = BigUint::from_bytes_be(&self.0);
        let x = BigUint::from_bytes_be(prepared_digest);
        if y >= *public_key.n() || x >= *public_key.n() {
            return false;
        }
        y.modpow(public_key.e(), public_key.n()) == x
    }
}

impl From<Signature> for Vec<u8> {
    fn from(sig: Signature) -> Vec<u8> {
        sig.0
    }
}

impl core::fmt::Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Signature")
            .field(&hex_string(&self.0))
            .finish()
    }
}

fn hex_string(bytes: &[u8]) -> String {
    use core::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}
