// -*- mode: rust; -*-
//
// This file is part of trsa.

//! Component F: combining `K` signature shares into a standard RSA
//! signature.
//!
//! Grounded on `original_source/signature_share.go`'s `Join` and
//! `LagrangeInterpolation` methods, with structural texture from
//! ZcashFoundation-redjubjub's `frost.rs` (`gen_lagrange_coeff`/`aggregate`).

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;

use crate::bignum;
use crate::error::Error;
use crate::key_meta::KeyMeta;
use crate::signature::Signature;
use crate::signature_share::{self, SignatureShare};

/// Combines at least `key_meta.k()` signature shares into a standard RSA
/// signature over the PKCS#1-v1.5-encoded document hash `prepared_digest`.
///
/// Only the first `K` of the supplied shares are used, mirroring the
/// reference combiner; callers that have more than `K` honest shares should
/// verify each one with [`SignatureShare::verify`] first and pass only the
/// ones that passed. This function performs no such check itself -- it
/// trusts its input the way the underlying reconstruction always has.
pub fn combine(
    shares: &[SignatureShare],
    prepared_digest: &[u8],
    key_meta: &KeyMeta,
) -> Result<Signature, Error> {
    let k = key_meta.k() as usize;
    if shares.len() < k {
        return Err(Error::InsufficientShares);
    }
    let chosen = &shares[..k];

    for (idx, share) in chosen.iter().enumerate() {
        if share.id() == 0 || share.id() > key_meta.l() {
            return Err(Error::InvalidShareId);
        }
        if chosen[..idx].iter().any(|other| other.id() == share.id()) {
            return Err(Error::DuplicateShareIds);
        }
    }

    let public_key = key_meta.public_key();
    let n = public_key.n();
    let e = public_key.e();

    let x_raw = signature_share::message_integer(prepared_digest, public_key)?;
    let (x, jacobied) = signature_share::lift_message(&x_raw, key_meta);

    let l = BigInt::from(key_meta.l());
    let mut delta = BigInt::one();
    let mut i = BigInt::one();
    while i <= l {
        delta *= &i;
        i += 1;
    }
    let e_prime = BigInt::from(4) * &delta * &delta;

    let mut w = BigUint::one();
    for share in chosen {
        let lambda = lagrange_coefficient(chosen, share.id(), &delta);
        let lambda_times_2 = lambda * 2u32;
        w = (&w * bignum::mod_pow_signed(share.xi(), &lambda_times_2, n)) % n;
    }

    let egcd = e_prime.extended_gcd(&BigInt::from(e.clone()));
    debug_assert_eq!(egcd.gcd, BigInt::one(), "4*(L!)^2 and e must be coprime");
    let wa = bignum::mod_pow_signed(&w, &egcd.x, n);
    let xb = bignum::mod_pow_signed(&x, &egcd.y, n);
    let mut y = (&wa * &xb) % n;

    if jacobied {
        let u = key_meta.verification_key().u();
        let inv_u = bignum::mod_inverse(u, n).expect("u is invertible mod n by construction");
        y = (&y * &inv_u) % n;
    }

    let signature = Signature::from_biguint(&y, public_key.size());
    if !signature.verify(prepared_digest, public_key) {
        return Err(Error::InternalInconsistency);
    }
    Ok(signature)
}

/// `delta * lambda_j`, where `lambda_j` is the Lagrange coefficient for
/// interpolating `f(0)` from the shares in `chosen`, evaluated at index `j`.
/// Scaling by `delta = L!` keeps every intermediate value an integer.
fn lagrange_coefficient(chosen: &[SignatureShare], j: u16, delta: &BigInt) -> BigInt {
    let j = BigInt::from(j);
    let mut num = BigInt::one();
    let mut den = BigInt::one();
    for share in chosen {
        let id = BigInt::from(share.id());
        if id != j {
            num *= &id;
            den *= &id - &j;
        }
    }
    bignum::exact_div(&(delta * &num), &den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dealer::{self, KeyMetaArgs};
    use crate::digest_info::{self, DigestAlgorithm};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0xC0B1E4)
    }

    fn prepared(key_meta: &KeyMeta, message: &[u8]) -> Vec<u8> {
        let digest = digest_info::sha256(message);
        digest_info::prepare_document_hash(
            key_meta.public_key().size(),
            DigestAlgorithm::Sha256,
            &digest,
        )
        .unwrap()
    }

    #[test]
    fn combines_threshold_shares_into_a_valid_signature() {
        let mut rng = rng();
        let (shares, key_meta) =
            dealer::generate_keys(384, 3, 5, &mut rng, &KeyMetaArgs::default()).unwrap();
        let digest = prepared(&key_meta, b"attack at dawn");

        let sig_shares: Vec<SignatureShare> = shares[..3]
            .iter()
            .map(|ks| SignatureShare::sign(ks, &digest, &mut rng).unwrap())
            .collect();

        let signature = combine(&sig_shares, &digest, &key_meta).unwrap();
        assert!(signature.verify(&digest, key_meta.public_key()));
    }

    #[test]
    fn any_k_subset_reconstructs_the_same_signature() {
        let mut rng = rng();
        let (shares, key_meta) =
            dealer::generate_keys(384, 3, 5, &mut rng, &KeyMetaArgs::default()).unwrap();
        let digest = prepared(&key_meta, b"attack at dawn");

        let all_shares: Vec<SignatureShare> = shares
            .iter()
            .map(|ks| SignatureShare::sign(ks, &digest, &mut rng).unwrap())
            .collect();

        let first = combine(&all_shares[0..3], &digest, &key_meta).unwrap();
        let second = combine(&all_shares[2..5], &digest, &key_meta).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn rejects_too_few_shares() {
        let mut rng = rng();
        let (shares, key_meta) =
            dealer::generate_keys(384, 3, 5, &mut rng, &KeyMetaArgs::default()).unwrap();
        let digest = prepared(&key_meta, b"attack at dawn");

        let sig_shares: Vec<SignatureShare> = shares[..2]
            .iter()
            .map(|ks| SignatureShare::sign(ks, &digest, &mut rng).unwrap())
            .collect();

        assert_eq!(
            combine(&sig_shares, &digest, &key_meta).unwrap_err(),
            Error::InsufficientShares
        );
    }

    #[test]
    fn rejects_duplicate_share_ids() {
        let mut rng = rng();
        let (shares, key_meta) =
            dealer::generate_keys(384, 3, 5, &mut rng, &KeyMetaArgs::default()).unwrap();
        let digest = prepared(&key_meta, b"attack at dawn");

        let one = SignatureShare::sign(&shares[0], &digest, &mut rng).unwrap();
        let two = SignatureShare::sign(&shares[1], &digest, &mut rng).unwrap();
        let dup = one.clone();

        assert_eq!(
            combine(&[one, two, dup], &digest, &key_meta).unwrap_err(),
            Error::DuplicateShareIds
        );
    }
}
