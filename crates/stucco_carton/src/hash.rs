//! Fast hashing utilities using xxHash3.
//!
//! HMR record ids must stay identical across reloads of the same module, so
//! they are derived from the module id and export name only.

use xxhash_rust::xxh3::xxh3_64;

/// Compute a 64-bit hash of the given string using xxHash3.
#[inline]
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

/// Convert a hash to a hex string (16 characters).
#[inline]
pub fn hash_to_hex(hash: u64) -> String {
    format!("{:016x}", hash)
}

/// Compute hash of a string and return as hex.
#[inline]
pub fn content_hash(content: &str) -> String {
    hash_to_hex(hash_str(content))
}

/// Stable id for a hot component, keyed by module id and exported name.
#[inline]
pub fn hmr_id(module_id: &str, exported: &str) -> String {
    let mut key = String::with_capacity(module_id.len() + exported.len());
    key.push_str(module_id);
    key.push_str(exported);
    content_hash(&key)
}
