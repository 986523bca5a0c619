// -*- mode: rust; -*-
//
// This file is part of trsa.

//! Components D and E: producing and checking one participant's signature
//! share, via a Fiat-Shamir-transformed zero-knowledge proof that the
//! share's exponent matches its publicly committed verification value.
//!
//! Grounded on `original_source/signature_share.go`'s `Verify` method for
//! the proof's arithmetic, generalized to a `sign` counterpart per the
//! proof's symmetry (the Go sources retrieved for this pack did not include
//! the signer side), with structural texture from ZcashFoundation-redjubjub's
//! `frost.rs` `verify_share`.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::bignum;
use crate::error::Error;
use crate::key_meta::KeyMeta;
use crate::key_share::KeyShare;
use crate::public_key::PublicKey;

/// Extra bits of statistical hiding added to the proof's random nonce,
/// beyond the bit length of the modulus. Twice the output size of the hash
/// used for the Fiat-Shamir challenge, per Shoup's construction.
const NONCE_SECURITY_BITS: u64 = 2 * 256;

/// One participant's share of a signature, together with a non-interactive
/// zero-knowledge proof that it was computed honestly with the exponent
/// committed to in [`crate::verification_key::VerificationKey`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignatureShare {
    pub(crate) id: u16,
    pub(crate) xi: BigUint,
    pub(crate) c: BigUint,
    pub(crate) z: BigUint,
}

impl SignatureShare {
    /// This share's 1-based participant id.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The raw share value `x^(2*s_i) mod n`.
    pub fn xi(&self) -> &BigUint {
        &self.xi
    }

    /// The proof's Fiat-Shamir challenge.
    pub fn c(&self) -> &BigUint {
        &self.c
    }

    /// The proof's response.
    pub fn z(&self) -> &BigUint {
        &self.z
    }

    /// Produces a signature share and its proof over an already
    /// PKCS#1-v1.5-encoded document hash (see
    /// [`crate::digest_info::prepare_document_hash`]).
    #[cfg(feature = "std")]
    pub fn sign<R: RngCore + CryptoRng>(
        key_share: &KeyShare,
        prepared_digest: &[u8],
        rng: &mut R,
    ) -> Result<SignatureShare, Error> {
        let key_meta = key_share.key_meta();
        let n = key_meta.public_key().n();
        let v = key_meta.verification_key().v();

        let x_raw = message_integer(prepared_digest, key_meta.public_key())?;
        let (x, _) = lift_message(&x_raw, key_meta);

        let four = BigUint::from(4u32);
        let two = BigUint::from(2u32);
        let x_tilde = x.modpow(&four, n);
        let two_si = &key_share.si * &two;
        let xi = x.modpow(&two_si, n);
        let xi2 = xi.modpow(&two, n);

        let nonce_bits = n.bits() + NONCE_SECURITY_BITS;
        let bound = BigUint::one() << nonce_bits;
        let r = bignum::random_range(&BigUint::zero(), &bound, rng);

        let v_prime = v.modpow(&r, n);
        let x_prime = x_tilde.modpow(&r, n);
        let v_i = key_meta.verification_key().verification_value(key_share.id)?;

        let c = fiat_shamir_challenge(key_meta, &x_tilde, v_i, &xi2, &v_prime, &x_prime);

        let z_int = BigInt::from(key_share.si.clone()) * BigInt::from(c.clone())
            + BigInt::from(r);
        let z = z_int
            .to_biguint()
            .expect("si*c+r is a sum of non-negative integers");

        Ok(SignatureShare {
            id: key_share.id,
            xi,
            c,
            z,
        })
    }

    /// Checks this share's proof against the public metadata and the
    /// PKCS#1-v1.5-encoded document hash it was allegedly produced over.
    #[cfg(feature = "std")]
    pub fn verify(&self, prepared_digest: &[u8], key_meta: &KeyMeta) -> bool {
        let n = key_meta.public_key().n();
        let v = key_meta.verification_key().v();

        let x_raw = match message_integer(prepared_digest, key_meta.public_key()) {
            Ok(x) => x,
            Err(_) => return false,
        };
        let v_i = match key_meta.verification_key().verification_value(self.id) {
            Ok(v_i) => v_i,
            Err(_) => return false,
        };

        let (x, _) = lift_message(&x_raw, key_meta);
        let four = BigUint::from(4u32);
        let two = BigUint::from(2u32);
        let x_tilde = x.modpow(&four, n);
        let xi2 = self.xi.modpow(&two, n);

        let neg_c = -BigInt::from(self.c.clone());
        let v_prime = {
            let a = v.modpow(&self.z, n);
            let b = bignum::mod_pow_signed(v_i, &neg_c, n);
            (&a * &b) % n
        };
        let x_prime = {
            let a = x_tilde.modpow(&self.z, n);
            let neg_two_c = &neg_c * BigInt::from(2u32);
            let b = bignum::mod_pow_signed(&self.xi, &neg_two_c, n);
            (&a * &b) % n
        };

        let c_prime = fiat_shamir_challenge(key_meta, &x_tilde, v_i, &xi2, &v_prime, &x_prime);
        c_prime == self.c
    }
}

/// Reads the document hash as an integer, checking it is in range for the
/// modulus.
pub(crate) fn message_integer(prepared_digest: &[u8], public_key: &PublicKey) -> Result<BigUint, Error> {
    let x_raw = BigUint::from_bytes_be(prepared_digest);
    if x_raw >= *public_key.n() {
        return Err(Error::MessageOutOfRange);
    }
    Ok(x_raw)
}

/// Lifts the raw message integer into the cyclic group of squares mod `n`:
/// if `x_raw` is itself a quadratic residue it is used directly, otherwise
/// it is shifted into the subgroup by multiplying by `u^e`. Returns the
/// lifted value and whether the shift was applied (the combiner needs this
/// to undo it on the reconstructed signature).
pub(crate) fn lift_message(x_raw: &BigUint, key_meta: &KeyMeta) -> (BigUint, bool) {
    let n = key_meta.public_key().n();
    if bignum::jacobi(x_raw, n) == 1 {
        (x_raw.clone(), false)
    } else {
        let u = key_meta.verification_key().u();
        let e = key_meta.public_key().e();
        let shifted = (x_raw * u.modpow(e, n)) % n;
        (shifted, true)
    }
}

/// The shared Fiat-Shamir transcript hash used by both `sign` and `verify`,
/// so the two sides are guaranteed to hash byte-identical input: `V || U ||
/// x~ || v_i || xi^2 || v' || x'`, each serialized via
/// [`num_bigint::BigUint::to_bytes_be`], reduced mod `n`.
#[cfg(feature = "std")]
fn fiat_shamir_challenge(
    key_meta: &KeyMeta,
    x_tilde: &BigUint,
    v_i: &BigUint,
    xi2: &BigUint,
    v_prime: &BigUint,
    x_prime: &BigUint,
) -> BigUint {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    for part in [
        key_meta.verification_key().v(),
        key_meta.verification_key().u(),
        x_tilde,
        v_i,
        xi2,
        v_prime,
        x_prime,
    ] {
        hasher.update(part.to_bytes_be());
    }
    let digest = hasher.finalize();
    BigUint::from_bytes_be(&digest) % key_meta.public_key().n()
}
