// -*- mode: rust; -*-
//
// This file is part of trsa.

use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::key_meta::KeyMeta;

/// One participant's share of the secret signing exponent.
///
/// `si` is zeroized on drop: it is the only long-lived secret this crate
/// hands back to a caller (the dealer's other intermediates never leave
/// [`crate::dealer::generate_keys`]).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyShare {
    #[zeroize(skip)]
    pub(crate) id: u16,
    pub(crate) si: BigUint,
    #[zeroize(skip)]
    pub(crate) key_meta: KeyMeta,
}

impl KeyShare {
    pub(crate) fn new(id: u16, si: BigUint, key_meta: KeyMeta) -> Self {
        Self { id, si, key_meta }
    }

    /// This share's 1-based index in `[1, L]`.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The public metadata this share was generated under.
    pub fn key_meta(&self) -> &KeyMeta {
        &self.key_meta
    }
}

impl core::fmt::Debug for KeyShare {
    /// Deliberately omits `si`: this is a secret value and should never end
    /// up in a log line via a derived `Debug` impl.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyShare").field("id", &self.id).finish_non_exhaustive()
    }
}
