#![doc(html_root_url = "https://docs.rs/trsa/0.1.0")]
#![cfg_attr(feature = "nightly", feature(external_doc))]
#![cfg_attr(feature = "nightly", doc(include = "../README.md"))]
#![deny(missing_docs)]

//! An implementation of Shoup's practical threshold RSA signature scheme.
//!
//! A `(K, L)` threshold setup lets any `K` of `L` participants jointly
//! produce a standard RSA PKCS#1 v1.5 signature, without any participant
//! ever holding the RSA private exponent in full: [`dealer::generate_keys`]
//! splits it into `L` Shamir shares over the group `Z/p'q'Z`, each
//! participant turns their share into a [`signature_share::SignatureShare`]
//! with a Fiat-Shamir proof that it was computed honestly, and
//! [`combiner::combine`] reconstructs the final signature from any `K` of
//! them by Lagrange interpolation in the exponent.
//!
//! Docs require the `nightly` feature until RFC 1990 lands.
//!
//! ```
//! use rand_chacha::ChaCha20Rng;
//! use rand_core::SeedableRng;
//! use trsa::dealer::{self, KeyMetaArgs};
//! use trsa::digest_info::{self, DigestAlgorithm};
//! use trsa::signature_share::SignatureShare;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//!
//! // A dealer splits a fresh RSA key into 5 shares, any 3 of which can
//! // later reconstruct a signature.
//! let (shares, key_meta) = dealer::generate_keys(512, 3, 5, &mut rng, &KeyMetaArgs::default())?;
//!
//! let message = b"hello world";
//! let digest = digest_info::sha256(message);
//! let prepared = digest_info::prepare_document_hash(
//!     key_meta.public_key().size(),
//!     DigestAlgorithm::Sha256,
//!     &digest,
//! )?;
//!
//! // Each participant signs independently and every share is individually
//! // checkable before it is ever handed to a combiner.
//! let sig_shares: Vec<SignatureShare> = shares
//!     .iter()
//!     .map(|share| {
//!         let sig_share = SignatureShare::sign(share, &prepared, &mut rng)?;
//!         assert!(sig_share.verify(&prepared, &key_meta));
//!         Ok::<_, trsa::Error>(sig_share)
//!     })
//!     .collect::<Result<_, _>>()?;
//!
//! // Any 3 of the 5 shares reconstruct the same standard RSA signature.
//! let signature = trsa::combiner::combine(&sig_shares[..3], &prepared, &key_meta)?;
//! assert!(signature.verify(&prepared, key_meta.public_key()));
//! # Ok::<(), trsa::Error>(())
//! ```

pub mod bignum;
pub mod combiner;
pub mod dealer;
pub mod digest_info;
mod error;
mod key_meta;
mod key_share;
mod public_key;
pub mod signature;
pub mod signature_share;
mod verification_key;

pub use error::Error;
pub use key_meta::KeyMeta;
pub use key_share::KeyShare;
pub use public_key::PublicKey;
pub use signature::Signature;
pub use verification_key::VerificationKey;
