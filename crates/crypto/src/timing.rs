//! Constant-time operations for security.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Lengths are public (the expected digest always has the same length), so a
/// length mismatch returns early. Equal-length inputs are compared with
/// `subtle`, whose running time does not depend on where the first differing
/// byte is.
///
/// # Arguments
/// * `a` - First byte slice
/// * `b` - Second byte slice
///
/// # Returns
/// true if slices are equal, false otherwise
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices() {
        assert!(constant_time_compare(b"hello", b"hello"));
    }

    #[test]
    fn test_different_slices() {
        assert!(!constant_time_compare(b"hello", b"world"));
    }

    #[test]
    fn test_difference_in_last_byte() {
        assert!(!constant_time_compare(b"hmac-sha256-hex=00", b"hmac-sha256-hex=01"));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_compare(b"hello", b"hi"));
        assert!(!constant_time_compare(b"hello", b"hello "));
    }

    #[test]
    fn test_empty_slices() {
        assert!(constant_time_compare(b"", b""));
        assert!(!constant_time_compare(b"", b"x"));
    }
}
