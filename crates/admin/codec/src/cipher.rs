//! AES-256-GCM seal/open with a prepended random nonce.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::{AdminKey, CodecError};

/// Size of the GCM nonce in bytes (96 bits, the GCM standard).
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Encrypt and authenticate `plain`, returning `nonce || ciphertext || tag`.
///
/// A new random nonce is drawn for every call; the same key never seals two
/// messages under the same nonce.
pub fn encrypt(plain: &[u8], key: &AdminKey) -> Result<Vec<u8>, CodecError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CodecError::Encryption)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher
        .encrypt(&nonce, plain)
        .map_err(|_| CodecError::Encryption)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Verify and decrypt output of [`encrypt`].
///
/// Every failure (short input, bad tag, wrong key) is reported as
/// [`CodecError::Authentication`] so callers cannot tell them apart.
pub fn decrypt(sealed: &[u8], key: &AdminKey) -> Result<Vec<u8>, CodecError> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CodecError::Authentication);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CodecError::Authentication)?;
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CodecError::Authentication)
}
