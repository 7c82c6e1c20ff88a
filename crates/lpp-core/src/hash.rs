//! Content hashes over canonical JSON.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::LppError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal SHA-256 hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, LppError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
