//! SHA-256 hex digest helper.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest over `parts`, each terminated by a 0x1F unit
/// separator so that `["ab", "c"]` and `["a", "bc"]` hash differently.
pub fn sha256_hex_parts(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
        hasher.update([0x1F]);
    }
    format!("{:x}", hasher.finalize())
}
