//! Document checksums
//!
//! A rendered export is handed to the subject as-is; its SHA-256 digest lets
//! either side confirm later that the artifact was not altered.

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 checksum of raw bytes
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use gdpr_export::core::export::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"\"Account\"\n");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();

    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            calculate_checksum_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_checksum_changes_with_content() {
        assert_ne!(
            calculate_checksum_bytes(b"\"a\"\n"),
            calculate_checksum_bytes(b"\"b\"\n")
        );
    }
}
