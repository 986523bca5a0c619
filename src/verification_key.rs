// -*- mode: rust; -*-
//
// This file is part of trsa.

use num_bigint::BigUint;

use crate::error::Error;

/// Public material used to verify individual signature shares.
///
/// `v` generates the cyclic subgroup of squares mod `n`, `u` is a fixed
/// quadratic non-residue with Jacobi symbol `-1`, and `i[idx]` is
/// `v^{s_{idx+1}} mod n`, the per-share verification value for share id
/// `idx + 1`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationKey {
    pub(crate) v: BigUint,
    pub(crate) u: BigUint,
    pub(crate) i: Vec<BigUint>,
}

impl VerificationKey {
    pub(crate) fn new(v: BigUint, u: BigUint, i: Vec<BigUint>) -> Self {
        Self { v, u, i }
    }

    /// The generator of the quadratic-residue subgroup mod `n`.
    pub fn v(&self) -> &BigUint {
        &self.v
    }

    /// The fixed quadratic non-residue with Jacobi symbol `-1`.
    pub fn u(&self) -> &BigUint {
        &self.u
    }

    /// The per-share verification value for 1-based share id `id`.
    pub fn verification_value(&self, id: u16) -> Result<&BigUint, Error> {
        let idx = id.checked_sub(1).ok_or(Error::InvalidShareId)?;
        self.i.get(idx as usize).ok_or(Error::InvalidShareId)
    }
}
