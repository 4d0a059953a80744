//! Plaintext upload size policy
//!
//! The ceiling is one below `i32::MAX`: the storage network encodes entity
//! sizes in signed 32-bit fields, so the bound is protocol-imposed and must
//! not be widened or made configurable.

use crate::error::AppError;

/// Hard ceiling on plaintext upload size in bytes (2^31 - 2).
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 2_147_483_646;

/// Enforce the plaintext size ceiling.
///
/// This is the single enforcement point; it runs once at wrapper
/// construction and is never rechecked afterwards.
pub fn check_upload_size(size: u64) -> Result<(), AppError> {
    if size > MAX_UPLOAD_SIZE_BYTES {
        return Err(AppError::SizeLimitExceeded {
            size,
            max: MAX_UPLOAD_SIZE_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_sizes_below_ceiling() {
        assert!(check_upload_size(0).is_ok());
        assert!(check_upload_size(10).is_ok());
        assert!(check_upload_size(MAX_UPLOAD_SIZE_BYTES - 1).is_ok());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Exactly 2,147,483,646 bytes is accepted
        assert!(check_upload_size(MAX_UPLOAD_SIZE_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_one_past_boundary() {
        let err = check_upload_size(MAX_UPLOAD_SIZE_BYTES + 1).unwrap_err();
        match err {
            AppError::SizeLimitExceeded { size, max } => {
                assert_eq!(size, 2_147_483_647);
                assert_eq!(max, 2_147_483_646);
            }
            other => panic!("Expected SizeLimitExceeded, got {:?}", other),
        }
    }
}
