// -*- mode: rust; -*-
//
// This file is part of trsa.

#[cfg(feature = "std")]
use thiserror::Error;

/// An error arising anywhere in the threshold-RSA core.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum Error {
    /// `K == 0`, `K > L`, `L >= 2^16 - 1`, or a non-positive bit length was requested.
    #[cfg_attr(feature = "std", error("invalid threshold parameters"))]
    InvalidParameters,
    /// The RNG or the prime-generation loop failed to produce a safe prime.
    #[cfg_attr(feature = "std", error("prime generation failed"))]
    PrimeGenerationFailed,
    /// A caller-supplied public exponent shares a factor with `4m`.
    #[cfg_attr(feature = "std", error("public exponent is not coprime with 4*p'*q'"))]
    ExponentNotCoprime,
    /// The modulus is too small to hold the DigestInfo plus the minimum PKCS#1 v1.5 padding.
    #[cfg_attr(feature = "std", error("modulus too short for this DigestInfo"))]
    EncodingTooShort,
    /// `x_raw >= N`.
    #[cfg_attr(
        feature = "std",
        error("message integer is out of range for this modulus")
    )]
    MessageOutOfRange,
    /// A share's `Id` is not in `[1, L]`.
    #[cfg_attr(feature = "std", error("share id is out of range"))]
    InvalidShareId,
    /// Fewer than `K` shares were supplied to the combiner.
    #[cfg_attr(feature = "std", error("insufficient signature shares"))]
    InsufficientShares,
    /// Two supplied shares carry the same `Id`.
    #[cfg_attr(feature = "std", error("duplicate share ids"))]
    DuplicateShareIds,
    /// The combiner produced a signature that does not verify against the public key.
    ///
    /// This indicates a bug, not an expected runtime condition: it should
    /// never fire given honestly-produced, individually-verified shares.
    #[cfg_attr(
        feature = "std",
        error("combined signature failed the internal self-check")
    )]
    InternalInconsistency,
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::InvalidParameters => "invalid threshold parameters",
            Error::PrimeGenerationFailed => "prime generation failed",
            Error::ExponentNotCoprime => "public exponent is not coprime with 4*p'*q'",
            Error::EncodingTooShort => "modulus too short for this DigestInfo",
            Error::MessageOutOfRange => "message integer is out of range for this modulus",
            Error::InvalidShareId => "share id is out of range",
            Error::InsufficientShares => "insufficient signature shares",
            Error::DuplicateShareIds => "duplicate share ids",
            Error::InternalInconsistency => "combined signature failed the internal self-check",
        };
        f.write_str(msg)
    }
}
