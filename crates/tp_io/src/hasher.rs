//! crates/tp_io/src/hasher.rs
//!
//! Deterministic hashing and plan ids.
//! - `sha256_hex` over raw bytes; `sha256_canonical` over canonical JSON.
//! - `PLAN:<hex>` ids derive from the canonical bytes of a plan body, so two
//!   runs over identical inputs carry the same id.
//! - Hex digests are lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tp_core::ids::PlanId;

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// `PLAN:<hex>` for a plan body.
pub fn plan_id_for<T: Serialize>(value: &T) -> IoResult<PlanId> {
    let hex = sha256_canonical(value)?;
    PlanId::from_digest_hex(&hex).map_err(|e| IoError::Invalid(e.to_string()))
}
