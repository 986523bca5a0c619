//! Bignum utilities: uniform random integers, safe-prime generation, the
//! Jacobi symbol, and the signed-exponent modular exponentiation the
//! combiner needs for its extended-GCD step.
//!
//! Grounded on `original_source/utils.go` (`RandomDev`, `nextPrime`,
//! `randomPrime`, `GenerateSafePrime`), with the safe-prime asymmetry fixed
//! per the design notes (see DESIGN.md).

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::error::Error;

/// Number of Miller-Rabin rounds used throughout this crate.
pub const MILLER_RABIN_ROUNDS: usize = 25;

/// Small primes used to quickly reject obvious composites before paying for
/// a full Miller-Rabin round.
const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Draws a uniform random integer of exactly `bit_len` bits, top bit set.
///
/// Mirrors `RandomDev`: samples `ceil(bit_len/8)` bytes from `rng`, clears
/// bits above position `bit_len - 1`, then forces bit `bit_len - 1` to 1.
pub fn random_uniform<R: RngCore + CryptoRng>(
    bit_len: usize,
    rng: &mut R,
) -> Result<BigUint, Error> {
    if bit_len == 0 {
        return Err(Error::InvalidParameters);
    }
    let byte_len = bit_len.div_ceil(8);
    let excess_bits = byte_len * 8 - bit_len;
    let mut bytes = vec![0u8; byte_len];
    rng.fill_bytes(&mut bytes);
    if excess_bits > 0 {
        bytes[0] &= 0xFFu8 >> excess_bits;
    }
    bytes[0] |= 1u8 << (7 - excess_bits);
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Draws a uniform random integer in `[0, bound)`. Used for Miller-Rabin
/// witnesses and for sampling secret polynomial coefficients / verification
/// key generators, which need no particular bit-length shape.
fn random_below<R: RngCore + CryptoRng>(bound: &BigUint, rng: &mut R) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }
    let bits = bound.bits() as usize;
    let byte_len = bits.div_ceil(8);
    let excess_bits = byte_len * 8 - bits;
    loop {
        let mut bytes = vec![0u8; byte_len];
        rng.fill_bytes(&mut bytes);
        if excess_bits > 0 {
            bytes[0] &= 0xFFu8 >> excess_bits;
        }
        let candidate = BigUint::from_bytes_be(&bytes);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Draws a uniform random integer in `[lo, hi)`. `hi` must be `> lo`.
pub fn random_range<R: RngCore + CryptoRng>(lo: &BigUint, hi: &BigUint, rng: &mut R) -> BigUint {
    lo + random_below(&(hi - lo), rng)
}

/// Miller-Rabin primality test with `rounds` independent random witnesses.
pub fn is_probably_prime<R: RngCore + CryptoRng>(
    n: &BigUint,
    rounds: usize,
    rng: &mut R,
) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    if *n == two {
        return true;
    }
    if n.is_even() {
        return false;
    }
    for &p in SMALL_PRIMES {
        let sp = BigUint::from(p);
        if *n == sp {
            return true;
        }
        if (n % &sp).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - BigUint::one();
    let mut d = n_minus_one.clone();
    let mut s: u32 = 0;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        let a = random_range(&two, &n_minus_one, rng);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 0..s.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Advances `num` to the next probable prime: forces it odd, then adds 2
/// repeatedly until Miller-Rabin (25 rounds) passes.
pub fn next_prime<R: RngCore + CryptoRng>(mut num: BigUint, rng: &mut R) -> BigUint {
    num.set_bit(0, true);
    while !is_probably_prime(&num, MILLER_RABIN_ROUNDS, rng) {
        num += 2u32;
    }
    num
}

/// Samples a probable prime of exactly `bit_len` bits.
///
/// Mirrors `randomPrime`: retries the whole draw whenever `next_prime`'s
/// repeated `+2` carries the bit length past `bit_len`.
pub fn random_prime<R: RngCore + CryptoRng>(
    bit_len: usize,
    rng: &mut R,
) -> Result<BigUint, Error> {
    if bit_len == 0 {
        return Err(Error::InvalidParameters);
    }
    loop {
        let candidate = random_uniform(bit_len, rng)?;
        let candidate = next_prime(candidate, rng);
        if candidate.bits() as usize == bit_len {
            return Ok(candidate);
        }
    }
}

/// Generates a safe prime `p = 2q' + 1` of exactly `bit_len` bits, `q'` prime.
///
/// The Go source this is grounded on computes `q = (p-1)/2` and `r =
/// 2*(p+1)` and returns `r` whenever `r` is probably prime — but `r` is even
/// and can never be of the safe-prime form, so that branch is a bug (see
/// DESIGN.md). This implementation only ever returns `p` itself, and only
/// when `(p-1)/2` is prime.
pub fn generate_safe_prime<R: RngCore + CryptoRng>(
    bit_len: usize,
    rng: &mut R,
) -> Result<BigUint, Error> {
    loop {
        let p = random_prime(bit_len, rng)?;
        let q = (&p - BigUint::one()) >> 1;
        if is_probably_prime(&q, MILLER_RABIN_ROUNDS, rng) {
            return Ok(p);
        }
    }
}

/// The Jacobi symbol `(a/n)`, for odd `n > 0`.
pub fn jacobi(a: &BigUint, n: &BigUint) -> i32 {
    debug_assert!(n.is_odd() && !n.is_zero(), "jacobi: modulus must be odd and positive");
    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i32;
    let four = BigUint::from(4u32);
    let eight = BigUint::from(8u32);

    while !a.is_zero() {
        while a.is_even() {
            a >>= 1;
            let r8 = &n % &eight;
            if r8 == BigUint::from(3u32) || r8 == BigUint::from(5u32) {
                result = -result;
            }
        }
        core::mem::swap(&mut a, &mut n);
        if &a % &four == BigUint::from(3u32) && &n % &four == BigUint::from(3u32) {
            result = -result;
        }
        a %= &n;
    }

    if n.is_one() {
        result
    } else {
        0
    }
}

/// The modular inverse of `a` mod `modulus`, or `None` if they are not coprime.
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let a_int = BigInt::from(a.clone());
    let m_int = BigInt::from(modulus.clone());
    let egcd = a_int.extended_gcd(&m_int);
    if egcd.gcd != BigInt::one() {
        return None;
    }
    let mut x = egcd.x % &m_int;
    if x.is_negative() {
        x += &m_int;
    }
    x.to_biguint()
}

/// `base ^ exp mod modulus`, where `exp` may be negative (computes the
/// modular inverse of `base` first in that case).
pub fn mod_pow_signed(base: &BigUint, exp: &BigInt, modulus: &BigUint) -> BigUint {
    if exp.is_negative() {
        let inv = mod_inverse(base, modulus).expect("mod_pow_signed: base not invertible");
        let pos_exp = (-exp)
            .to_biguint()
            .expect("negated negative BigInt is non-negative");
        inv.modpow(&pos_exp, modulus)
    } else {
        let pos_exp = exp
            .to_biguint()
            .expect("non-negative BigInt converts to BigUint");
        base.modpow(&pos_exp, modulus)
    }
}

/// `numerator / denominator`, asserting the division is exact.
///
/// Used for the Lagrange-coefficient scaling in the combiner, where `delta
/// = L!` is constructed specifically so every denominator divides it
/// evenly.
pub fn exact_div(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let (q, r) = numerator.div_rem(denominator);
    debug_assert!(r.is_zero(), "exact_div: division was not exact");
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0xC0FFEE)
    }

    #[test]
    fn random_uniform_has_exact_bit_length() {
        let mut rng = rng();
        for bit_len in [1, 7, 8, 9, 63, 64, 65, 256] {
            let n = random_uniform(bit_len, &mut rng).unwrap();
            assert_eq!(n.bits() as usize, bit_len, "bit_len={bit_len}");
        }
    }

    #[test]
    fn random_uniform_rejects_zero_bit_len() {
        let mut rng = rng();
        assert_eq!(random_uniform(0, &mut rng), Err(Error::InvalidParameters));
    }

    #[test]
    fn small_primes_are_detected() {
        let mut rng = rng();
        for &p in &[2u32, 3, 5, 7, 11, 97, 7919] {
            assert!(is_probably_prime(&BigUint::from(p), 25, &mut rng));
        }
        for &c in &[0u32, 1, 4, 6, 9, 25, 100, 7921] {
            assert!(!is_probably_prime(&BigUint::from(c), 25, &mut rng));
        }
    }

    #[test]
    fn generate_safe_prime_has_prime_sophie_germain_companion() {
        let mut rng = rng();
        let p = generate_safe_prime(64, &mut rng).unwrap();
        assert_eq!(p.bits() as usize, 64);
        assert!(is_probably_prime(&p, 25, &mut rng));
        let q = (&p - BigUint::one()) >> 1;
        assert!(is_probably_prime(&q, 25, &mut rng));
    }

    #[test]
    fn jacobi_matches_known_values() {
        // (1001/9907) = -1 is a standard textbook example.
        let a = BigUint::from(1001u32);
        let n = BigUint::from(9907u32);
        assert_eq!(jacobi(&a, &n), -1);

        // A perfect square is always a quadratic residue: Jacobi symbol 1
        // whenever gcd(a, n) == 1.
        let n2 = BigUint::from(101u32);
        let a2 = BigUint::from(16u32); // 4^2
        assert_eq!(jacobi(&a2, &n2), 1);
    }

    #[test]
    fn mod_inverse_round_trips() {
        let a = BigUint::from(17u32);
        let m = BigUint::from(3120u32);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!((&a * &inv) % &m, BigUint::one());
    }

    #[test]
    fn mod_pow_signed_handles_negative_exponent() {
        let base = BigUint::from(5u32);
        let modulus = BigUint::from(7u32);
        let pos = mod_pow_signed(&base, &BigInt::from(3), &modulus);
        assert_eq!(pos, BigUint::from(6u32)); // 5^3 = 125 = 17*7+6

        let neg = mod_pow_signed(&base, &BigInt::from(-1), &modulus);
        let inv = mod_inverse(&base, &modulus).unwrap();
        assert_eq!(neg, inv);
    }

    #[test]
    fn exact_div_divides_evenly() {
        let n = BigInt::from(120);
        let d = BigInt::from(4);
        assert_eq!(exact_div(&n, &d), BigInt::from(30));
    }
}
