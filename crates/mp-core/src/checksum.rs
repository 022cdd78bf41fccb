//! SHA-256 checksum utility for change detection.

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum over a sequence of `(name, content)` pairs.
///
/// Names are part of the digest so that renaming a file changes the
/// checksum even when its content does not.
pub fn compute_checksum<'a>(parts: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut hasher = Sha256::new();
    for (name, content) in parts {
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(content.len().to_le_bytes());
        hasher.update(content.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
