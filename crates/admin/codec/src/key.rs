//! Shared admin key.

use std::fmt;
use std::str::FromStr;

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{KeyInit, OsRng};

use crate::CodecError;

/// Size of the admin key in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// 256-bit key shared between a node's admin server and its operators.
///
/// Holding an `AdminKey` guarantees the key is exactly [`KEY_SIZE`] bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminKey([u8; KEY_SIZE]);

impl AdminKey {
    /// Create a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeyLength`] unless the input is exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CodecError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }

    /// Parse a hex-encoded key. An optional `0x` prefix is accepted.
    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| CodecError::InvalidKeyHex)?;
        Self::from_bytes(&bytes)
    }

    /// Generate a fresh key from the operating system's RNG.
    pub fn generate() -> Self {
        let generated = Aes256Gcm::generate_key(OsRng);
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(generated.as_slice());
        Self(key)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Avoid logging or persisting the returned bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl FromStr for AdminKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdminKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let hex = "ab".repeat(KEY_SIZE);
        let key = AdminKey::from_hex(&hex).unwrap();
        assert_eq!(key.as_bytes(), &[0xab; KEY_SIZE]);
        assert_eq!(key.to_hex(), hex);

        let prefixed = AdminKey::from_hex(&format!("0x{hex}")).unwrap();
        assert_eq!(prefixed, key);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = AdminKey::from_hex(&"00".repeat(16)).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: 16
            }
        );
        assert!(err.is_key_error());

        assert!(AdminKey::from_bytes(&[0u8; 33]).is_err());
        assert!(AdminKey::from_hex("").is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        let err = AdminKey::from_hex(&"zz".repeat(KEY_SIZE)).unwrap_err();
        assert_eq!(err, CodecError::InvalidKeyHex);
    }

    #[test]
    fn test_generate_is_random() {
        let a = AdminKey::generate();
        let b = AdminKey::generate();
        assert_ne!(a, b);
        assert_eq!(AdminKey::from_hex(&a.to_hex()).unwrap(), a);
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = AdminKey::from_bytes(&[7u8; KEY_SIZE]).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("0707"));
        assert!(debug.contains("REDACTED"));
    }
}
