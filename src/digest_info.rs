//! PKCS#1 v1.5 EMSA encoding (RFC 8017 §9.2): wraps a message digest in a
//! DigestInfo and pads it out to the modulus length.
//!
//! Grounded on the `emsa_pkcs1_v1_5_encode` shape in
//! `other_examples/14c10ffc_dennisss-dacha__pkg-crypto-src-rsa.rs.rs`.

use crate::error::Error;

/// A digest algorithm usable in the Fiat-Shamir-independent DigestInfo
/// wrapping. Only SHA-256 is supported, per spec scope.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum DigestAlgorithm {
    /// SHA-256, producing a 32-byte digest.
    Sha256,
}

impl DigestAlgorithm {
    /// The expected digest length in bytes for this algorithm.
    pub fn digest_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
        }
    }

    /// The fixed ASN.1 DER prefix for this algorithm's DigestInfo
    /// (`SEQUENCE { SEQUENCE { OID, NULL }, OCTET STRING }` up to the raw
    /// digest bytes). This is the well-known RFC 3447 Appendix B / RFC 8017
    /// constant also used by e.g. Go's `crypto/rsa`.
    fn der_prefix(self) -> &'static [u8] {
        match self {
            DigestAlgorithm::Sha256 => &[
                0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x01, 0x05, 0x00, 0x04, 0x20,
            ],
        }
    }
}

/// Computes the SHA-256 digest of `message`.
#[cfg(feature = "std")]
pub fn sha256(message: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(message);
    hasher.finalize().into()
}

/// Builds the PKCS#1 v1.5 EMSA-encoded block:
/// `0x00 || 0x01 || PS || 0x00 || T`, where `T` is the DER DigestInfo
/// wrapping `digest` and `PS` is `0xFF` padding sized so the result is
/// exactly `mod_byte_len` bytes long.
pub fn prepare_document_hash(
    mod_byte_len: usize,
    alg: DigestAlgorithm,
    digest: &[u8],
) -> Result<Vec<u8>, Error> {
    if digest.len() != alg.digest_len() {
        return Err(Error::EncodingTooShort);
    }

    let mut digest_info = Vec::with_capacity(alg.der_prefix().len() + digest.len());
    digest_info.extend_from_slice(alg.der_prefix());
    digest_info.extend_from_slice(digest);

    if mod_byte_len < digest_info.len() + 11 {
        return Err(Error::EncodingTooShort);
    }

    let ps_len = mod_byte_len - digest_info.len() - 3;
    let mut em = Vec::with_capacity(mod_byte_len);
    em.push(0x00);
    em.push(0x01);
    em.extend(core::iter::repeat(0xFFu8).take(ps_len));
    em.push(0x00);
    em.extend_from_slice(&digest_info);
    debug_assert_eq!(em.len(), mod_byte_len);
    Ok(em)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_expected_layout() {
        let digest = [0x11u8; 32];
        let em = prepare_document_hash(128, DigestAlgorithm::Sha256, &digest).unwrap();
        assert_eq!(em.len(), 128);
        assert_eq!(em[0], 0x00);
        assert_eq!(em[1], 0x01);
        assert_eq!(em[em.len() - 32 - 19 - 1], 0x00); // separator before DigestInfo
        assert_eq!(&em[em.len() - 32..], &digest[..]);
        // everything between the header and the separator is 0xFF padding
        assert!(em[2..em.len() - 32 - 19 - 1].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn rejects_too_short_modulus() {
        let digest = [0u8; 32];
        let result = prepare_document_hash(30, DigestAlgorithm::Sha256, &digest);
        assert_eq!(result, Err(Error::EncodingTooShort));
    }

    #[test]
    fn rejects_wrong_digest_length() {
        let short_digest = [0u8; 16];
        let result = prepare_document_hash(128, DigestAlgorithm::Sha256, &short_digest);
        assert_eq!(result, Err(Error::EncodingTooShort));
    }

    #[cfg(feature = "std")]
    #[test]
    fn sha256_matches_known_vector() {
        // SHA-256("") = e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
        let got = sha256(b"");
        let expected = [
            0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f,
            0xb9, 0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b,
            0x78, 0x52, 0xb8, 0x55,
        ];
        assert_eq!(got, expected);
    }
}
