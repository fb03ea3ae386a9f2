//! Optional AES-256-GCM encryption of the stored payload.
//!
//! An encrypted payload is a fresh 12-byte nonce followed by the ciphertext
//! and its tag. Encryption runs after compression, so the header checksum
//! covers the bytes as they sit on disk.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::save_error::SaveError;

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;

/// 256-bit key for encrypted saves.
#[derive(Clone, PartialEq, Eq)]
pub struct SaveKey([u8; KEY_LEN]);

impl SaveKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse 64 hex digits, e.g. from `GRID_BUILDER_SAVE_KEY`.
    pub fn from_hex(hex: &str) -> Result<Self, SaveError> {
        let hex = hex.trim();
        if hex.len() != KEY_LEN * 2 {
            return Err(SaveError::Encryption(format!(
                "key must be {} hex digits, got {}",
                KEY_LEN * 2,
                hex.len()
            )));
        }
        let mut bytes = [0u8; KEY_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = hex.get(i * 2..i * 2 + 2).unwrap_or_default();
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| SaveError::Encryption(format!("invalid hex digits '{pair}'")))?;
        }
        Ok(Self(bytes))
    }

    fn cipher(&self) -> Result<Aes256Gcm, SaveError> {
        Aes256Gcm::new_from_slice(&self.0).map_err(|e| SaveError::Encryption(e.to_string()))
    }
}

// Never print key material.
impl fmt::Debug for SaveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SaveKey(..)")
    }
}

pub fn encrypt_payload(key: &SaveKey, plain: &[u8]) -> Result<Vec<u8>, SaveError> {
    let nonce: [u8; NONCE_LEN] = rand::random();
    let sealed = key
        .cipher()?
        .encrypt(Nonce::from_slice(&nonce), plain)
        .map_err(|_| SaveError::Encryption("encryption failed".into()))?;
    let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Fails on a wrong key or a tampered payload.
pub fn decrypt_payload(key: &SaveKey, stored: &[u8]) -> Result<Vec<u8>, SaveError> {
    if stored.len() < NONCE_LEN {
        return Err(SaveError::Encryption(format!(
            "encrypted payload is {} bytes, shorter than its nonce",
            stored.len()
        )));
    }
    let (nonce, sealed) = stored.split_at(NONCE_LEN);
    key.cipher()?
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| SaveError::Encryption("wrong key or corrupted payload".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fill: u8) -> SaveKey {
        SaveKey::new([fill; KEY_LEN])
    }

    #[test]
    fn test_decrypts_with_same_key_only() {
        let stored = encrypt_payload(&key(7), b"level data").unwrap();
        assert_ne!(&stored[NONCE_LEN..], b"level data");
        assert_eq!(decrypt_payload(&key(7), &stored).unwrap(), b"level data");
        assert!(matches!(
            decrypt_payload(&key(8), &stored),
            Err(SaveError::Encryption(_))
        ));
    }

    #[test]
    fn test_nonce_differs_per_write() {
        let a = encrypt_payload(&key(1), b"same").unwrap();
        let b = encrypt_payload(&key(1), b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_payload_is_rejected() {
        assert!(decrypt_payload(&key(1), &[0u8; 4]).is_err());
    }

    #[test]
    fn test_key_from_hex() {
        let hex = "00112233445566778899aabbccddeeff00112233445566778899AABBCCDDEEFF";
        let parsed = SaveKey::from_hex(hex).unwrap();
        let mut expected = [0u8; KEY_LEN];
        for (i, b) in expected.iter_mut().enumerate() {
            *b = ((i % 16) as u8) * 0x11;
        }
        assert_eq!(parsed, SaveKey::new(expected));
        assert!(SaveKey::from_hex("abcd").is_err());
        assert!(SaveKey::from_hex(&"zz".repeat(32)).is_err());
        assert_eq!(format!("{parsed:?}"), "SaveKey(..)");
    }
}
