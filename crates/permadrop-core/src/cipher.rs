//! Envelope encryption for private-drive uploads
//!
//! Uses AES-256-GCM for authenticated encryption. The sealed layout is
//! `nonce || ciphertext || tag`, so the ciphertext size of a buffer is its
//! plaintext size plus a fixed envelope overhead. `encrypted_data_size` is
//! the size-accounting projection the upload wrapper exposes; it must stay
//! in lockstep with the layout produced by `EnvelopeCipher::seal`.

use crate::AppError;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use std::env;

/// Nonce length in bytes (AES-GCM standard 96-bit nonce)
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// Project the plaintext byte count to the sealed envelope byte count.
///
/// Deterministic and non-decreasing; the result is always >= the input.
/// Used for size accounting before any encryption actually happens.
/// Saturates near `u64::MAX`; such sizes are far beyond the upload ceiling
/// and never reach the cipher.
pub fn encrypted_data_size(plaintext_size: u64) -> u64 {
    plaintext_size.saturating_add((NONCE_LEN + TAG_LEN) as u64)
}

/// Envelope cipher for upload payloads (AES-256-GCM)
#[derive(Clone)]
pub struct EnvelopeCipher {
    cipher: Aes256Gcm,
}

impl EnvelopeCipher {
    /// Create a new cipher from a raw 32-byte key (e.g. for tests; avoids env mutation).
    pub fn from_key_bytes(key_bytes: &[u8]) -> Result<Self, AppError> {
        if key_bytes.len() != 32 {
            return Err(AppError::Internal(
                "Encryption key must be 32 bytes (256 bits)".to_string(),
            ));
        }
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Create a new cipher from the environment
    /// Expects ENCRYPTION_KEY to be a base64-encoded 32-byte key
    pub fn from_env() -> Result<Self, AppError> {
        let key_str = env::var("ENCRYPTION_KEY").map_err(|_| {
            AppError::Internal("ENCRYPTION_KEY environment variable not set".to_string())
        })?;

        let key_bytes = general_purpose::STANDARD
            .decode(&key_str)
            .map_err(|e| AppError::Internal(format!("Failed to decode encryption key: {}", e)))?;

        Self::from_key_bytes(&key_bytes)
    }

    /// Seal a plaintext buffer into `nonce || ciphertext || tag`
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, AppError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::Internal(format!("Encryption failed: {}", e)))?;

        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Open a sealed envelope produced by `seal`
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, AppError> {
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(AppError::Internal("Sealed data too short".to_string()));
        }

        let nonce = Nonce::from_slice(&sealed[..NONCE_LEN]);
        let ciphertext = &sealed[NONCE_LEN..];

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| AppError::Internal(format!("Decryption failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> EnvelopeCipher {
        EnvelopeCipher::from_key_bytes(&[7u8; 32]).expect("valid key")
    }

    #[test]
    fn test_seal_open_round_trip() {
        let cipher = test_cipher();
        let sealed = cipher.seal(b"hello permaweb").expect("seal");
        let opened = cipher.open(&sealed).expect("open");
        assert_eq!(opened, b"hello permaweb");
    }

    #[test]
    fn test_projection_matches_sealed_length() {
        // The size projection must agree with the real envelope layout,
        // otherwise downstream size accounting silently drifts.
        let cipher = test_cipher();
        for len in [0usize, 1, 10, 1024] {
            let plaintext = vec![0xAB; len];
            let sealed = cipher.seal(&plaintext).expect("seal");
            assert_eq!(sealed.len() as u64, encrypted_data_size(len as u64));
        }
    }

    #[test]
    fn test_projection_is_monotonic_and_dominates_plaintext() {
        let mut prev = encrypted_data_size(0);
        for n in 1..100u64 {
            let cur = encrypted_data_size(n);
            assert!(cur >= n);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn test_projection_saturates_instead_of_wrapping() {
        assert_eq!(encrypted_data_size(u64::MAX), u64::MAX);
        assert_eq!(encrypted_data_size(u64::MAX - 5), u64::MAX);
        assert_eq!(
            encrypted_data_size(u64::MAX - 28),
            u64::MAX
        );
    }

    #[test]
    fn test_rejects_wrong_key_length() {
        assert!(EnvelopeCipher::from_key_bytes(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_open_rejects_truncated_envelope() {
        let cipher = test_cipher();
        assert!(cipher.open(&[0u8; 8]).is_err());
    }
}
