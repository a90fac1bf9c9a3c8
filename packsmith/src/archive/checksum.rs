//! SHA-256 checksums for archive entries.

use sha2::{Digest, Sha256};

/// Calculate the lowercase hexadecimal SHA-256 hash of `data`.
///
/// # Example
///
/// ```
/// use packsmith::archive::sha256_hex;
///
/// assert_eq!(
///     sha256_hex(b"abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
