//! Deterministic short key derivation.
//!
//! A short key is the base-62 rendering of the leading 64 bits of the MD5
//! digest of the long URL, normalized to 6-8 characters. The same long URL
//! always yields the same key, so a key never needs to be stored before it
//! can be recomputed.
//!
//! Distinct URLs whose digest prefixes (or truncated renderings) coincide
//! share a key. Nothing here detects that.

use md5::{Digest, Md5};

/// Symbols of the base-62 alphabet, indexed by digit value.
const BASE62_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of hex characters of the digest interpreted as the key value.
const PREFIX_HEX_LEN: usize = 16;

/// Shortest key ever produced.
pub const MIN_KEY_LEN: usize = 6;

/// Longest key ever produced.
pub const MAX_KEY_LEN: usize = 8;

/// Derives the short key for a long URL.
///
/// Total for every input: the empty string hashes like any other.
///
/// # Examples
///
/// ```
/// use quorum_shortener::utils::key_deriver::derive_short_key;
///
/// let key = derive_short_key("https://example.com/a/very/long/path");
/// assert_eq!(key, derive_short_key("https://example.com/a/very/long/path"));
/// assert!((6..=8).contains(&key.len()));
/// ```
pub fn derive_short_key(long_url: &str) -> String {
    let digest = hex::encode(Md5::digest(long_url.as_bytes()));

    // A hex string of 16 characters always fits in a u64.
    let prefix = u64::from_str_radix(&digest[..PREFIX_HEX_LEN], 16).unwrap_or_default();

    key_from_prefix(prefix)
}

/// Encodes a digest prefix and normalizes the result to the key length range.
pub fn key_from_prefix(prefix: u64) -> String {
    normalize_length(encode_base62(prefix))
}

/// Renders `value` in base 62, most significant digit first.
///
/// Zero renders as the empty string.
fn encode_base62(mut value: u64) -> String {
    let mut digits = Vec::new();

    while value > 0 {
        digits.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Truncates to the most significant [`MAX_KEY_LEN`] digits, or pads the
/// low-order end with `'0'` up to [`MIN_KEY_LEN`].
fn normalize_length(mut key: String) -> String {
    if key.len() > MAX_KEY_LEN {
        key.truncate(MAX_KEY_LEN);
    } else if key.len() < MIN_KEY_LEN {
        let missing = MIN_KEY_LEN - key.len();
        key.extend(std::iter::repeat_n('0', missing));
    }

    key
}

/// Returns true if `key` could have been produced by [`derive_short_key`].
pub fn is_well_formed(key: &str) -> bool {
    (MIN_KEY_LEN..=MAX_KEY_LEN).contains(&key.len())
        && key.bytes().all(|b| b.is_ascii_alphanumeric())
}
