// -*- mode: rust; -*-
//
// This file is part of trsa.

//! The key dealer: generates an RSA modulus, splits the private exponent
//! into `L` Shamir shares with a `K`-out-of-`L` threshold, and derives the
//! public verification material used to check individual signature shares.
//!
//! Grounded on ZcashFoundation-redjubjub's `frost.rs`
//! `keygen_with_dealer`/`generate_shares` (coefficient sampling,
//! per-participant evaluation of the secret polynomial) generalized from the
//! Jubjub scalar field to the RSA exponent group `Z/mZ`, and on
//! `original_source/utils.go` for safe-prime generation.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::bignum;
use crate::error::Error;
use crate::key_meta::KeyMeta;
use crate::key_share::KeyShare;
use crate::public_key::PublicKey;
use crate::verification_key::VerificationKey;

/// Deterministic overrides for key generation, used by tests that need
/// reproducible key material. Any field left `None` is drawn from `rng` as
/// usual.
#[derive(Default, Clone)]
pub struct KeyMetaArgs {
    /// Override for the first safe prime.
    pub p: Option<BigUint>,
    /// Override for the second safe prime.
    pub q: Option<BigUint>,
    /// Override for the verification key's quadratic-residue generator.
    pub v: Option<BigUint>,
    /// Override for the verification key's quadratic non-residue.
    pub u: Option<BigUint>,
    /// Override for the public exponent. Defaults to 65537.
    pub e: Option<BigUint>,
}

/// The default public exponent, 65537.
pub fn default_public_exponent() -> BigUint {
    BigUint::from(65537u32)
}

/// `K` must be in `[1, L]` and `L` must be strictly less than `u16::MAX`
/// (reserved so share ids, which run `1..=L`, never collide with a sentinel
/// value).
fn valid_threshold_params(k: u16, l: u16) -> bool {
    k != 0 && k <= l && l < u16::MAX
}

/// Generates an RSA modulus of two `bit_len`-bit safe primes, splits the
/// private exponent into `L` shares with threshold `K`, and returns the
/// shares together with the public [`KeyMeta`] every participant needs to
/// sign and verify.
///
/// `K` must be in `[1, L]` and `L` must be strictly less than `u16::MAX`.
pub fn generate_keys<R: RngCore + CryptoRng>(
    bit_len: usize,
    k: u16,
    l: u16,
    rng: &mut R,
    args: &KeyMetaArgs,
) -> Result<(Vec<KeyShare>, KeyMeta), Error> {
    if !valid_threshold_params(k, l) || bit_len == 0 {
        return Err(Error::InvalidParameters);
    }

    let p = match &args.p {
        Some(p) => p.clone(),
        None => bignum::generate_safe_prime(bit_len, rng)
            .map_err(|_| Error::PrimeGenerationFailed)?,
    };
    let mut q = match &args.q {
        Some(q) => q.clone(),
        None => bignum::generate_safe_prime(bit_len, rng)
            .map_err(|_| Error::PrimeGenerationFailed)?,
    };
    while args.q.is_none() && q == p {
        q = bignum::generate_safe_prime(bit_len, rng).map_err(|_| Error::PrimeGenerationFailed)?;
    }
    if p == q {
        return Err(Error::PrimeGenerationFailed);
    }

    let n = &p * &q;
    let p_prime = (&p - BigUint::one()) >> 1;
    let q_prime = (&q - BigUint::one()) >> 1;
    let m = &p_prime * &q_prime;

    let e = args.e.clone().unwrap_or_else(default_public_exponent);
    let four_m = &m << 2;
    if e.gcd(&four_m) != BigUint::one() {
        return Err(Error::ExponentNotCoprime);
    }
    let d = bignum::mod_inverse(&e, &m).ok_or(Error::ExponentNotCoprime)?;

    // f(X) = d + a_1*X + ... + a_{k-1}*X^{k-1} mod m, so f(0) is the private
    // exponent and any K evaluations reconstruct it by Lagrange interpolation.
    let mut coefficients = Vec::with_capacity(k as usize - 1);
    for _ in 0..(k - 1) {
        coefficients.push(bignum::random_range(&BigUint::zero(), &m, rng));
    }

    let mut si_values = Vec::with_capacity(l as usize);
    for id in 1..=l {
        let x = BigUint::from(id);
        let mut value = BigUint::zero();
        for coeff in coefficients.iter().rev() {
            value = (&value * &x + coeff) % &m;
        }
        value = (&value * &x + &d) % &m;
        si_values.push(value);
    }

    let v = match &args.v {
        Some(v) => v.clone(),
        None => random_qr_generator(&n, rng),
    };
    let u = match &args.u {
        Some(u) => u.clone(),
        None => random_non_residue(&n, rng),
    };

    let i = si_values
        .iter()
        .map(|si| v.modpow(si, &n))
        .collect::<Vec<_>>();

    let public_key = PublicKey::new(n, e);
    let verification_key = VerificationKey::new(v, u, i);
    let key_meta = KeyMeta::new(public_key, k, l, verification_key);

    let shares = si_values
        .into_iter()
        .zip(1u16..=l)
        .map(|(si, id)| KeyShare::new(id, si, key_meta.clone()))
        .collect();

    Ok((shares, key_meta))
}

/// Draws a random generator of the cyclic group of squares mod `n`: squares
/// a uniform random element of `(Z/nZ)*`, resampling if the result is `0` or
/// `1` (either of which would make every share's verification value trivial).
fn random_qr_generator<R: RngCore + CryptoRng>(n: &BigUint, rng: &mut R) -> BigUint {
    loop {
        let r = bignum::random_range(&BigUint::from(2u32), n, rng);
        let v = r.modpow(&BigUint::from(2u32), n);
        if !v.is_zero() && !v.is_one() {
            return v;
        }
    }
}

/// Draws a random element of `(Z/nZ)*` with Jacobi symbol `-1`.
fn random_non_residue<R: RngCore + CryptoRng>(n: &BigUint, rng: &mut R) -> BigUint {
    loop {
        let u = bignum::random_range(&BigUint::from(2u32), n, rng);
        if bignum::jacobi(&u, n) == -1 {
            return u;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0xDEAL3D)
    }

    #[test]
    fn rejects_bad_thresholds() {
        let mut rng = rng();
        let args = KeyMetaArgs::default();
        assert_eq!(
            generate_keys(64, 0, 3, &mut rng, &args).unwrap_err(),
            Error::InvalidParameters
        );
        assert_eq!(
            generate_keys(64, 4, 3, &mut rng, &args).unwrap_err(),
            Error::InvalidParameters
        );
        assert_eq!(
            generate_keys(0, 2, 3, &mut rng, &args).unwrap_err(),
            Error::InvalidParameters
        );
    }

    #[test]
    fn accepts_l_just_below_the_boundary_but_rejects_l_at_u16_max() {
        assert!(valid_threshold_params(1, u16::MAX - 1));
        assert!(!valid_threshold_params(1, u16::MAX));
    }

    #[test]
    fn produces_l_shares_with_consistent_meta() {
        let mut rng = rng();
        let args = KeyMetaArgs::default();
        let (shares, key_meta) = generate_keys(128, 3, 5, &mut rng, &args).unwrap();
        assert_eq!(shares.len(), 5);
        for (idx, share) in shares.iter().enumerate() {
            assert_eq!(share.id(), (idx + 1) as u16);
            assert_eq!(share.key_meta(), &key_meta);
        }
        assert_eq!(key_meta.k(), 3);
        assert_eq!(key_meta.l(), 5);
    }

    #[test]
    fn verification_values_match_shares_via_generator() {
        let mut rng = rng();
        let args = KeyMetaArgs::default();
        let (shares, key_meta) = generate_keys(128, 2, 4, &mut rng, &args).unwrap();
        let n = key_meta.public_key().n();
        let v = key_meta.verification_key().v();
        for share in &shares {
            let expected = key_meta
                .verification_key()
                .verification_value(share.id())
                .unwrap();
            assert_eq!(&v.modpow(&share.si, n), expected);
        }
    }

    #[test]
    fn rejects_exponent_not_coprime_with_4m() {
        let mut rng = rng();
        // p, q both odd safe primes => p' and q' both odd, so e=2 always
        // shares a factor of 2 with 4*p'*q'.
        let p = bignum::generate_safe_prime(64, &mut rng).unwrap();
        let q = bignum::generate_safe_prime(64, &mut rng).unwrap();
        let args = KeyMetaArgs {
            p: Some(p),
            q: Some(q),
            e: Some(BigUint::from(2u32)),
            ..Default::default()
        };
        assert_eq!(
            generate_keys(64, 2, 3, &mut rng, &args).unwrap_err(),
            Error::ExponentNotCoprime
        );
    }
}
