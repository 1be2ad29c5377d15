//! Type-tagged admin frames.

use crate::cipher::{NONCE_SIZE, TAG_SIZE, decrypt, encrypt};
use crate::{AdminKey, CodecError};

/// Smallest sealed frame that can carry a message type.
pub const MIN_SEALED_FRAME_SIZE: usize = NONCE_SIZE + TAG_SIZE + 1;

/// Decrypted admin frame: a one-byte message type and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(msg_type: u8, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            msg_type,
            payload: payload.into(),
        }
    }

    /// Encode as `[msg_type] || payload`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.payload.len());
        out.push(self.msg_type);
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (msg_type, payload) = bytes.split_first().ok_or(CodecError::EmptyFrame)?;
        Ok(Self::new(*msg_type, payload))
    }

    pub fn into_parts(self) -> (u8, Vec<u8>) {
        (self.msg_type, self.payload)
    }
}

/// Build and encrypt a frame in one step.
pub fn seal_frame(key: &AdminKey, msg_type: u8, payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut plain = Vec::with_capacity(1 + payload.len());
    plain.push(msg_type);
    plain.extend_from_slice(payload);
    encrypt(&plain, key)
}

/// Decrypt a sealed frame and split off its message type.
pub fn open_frame(key: &AdminKey, sealed: &[u8]) -> Result<Frame, CodecError> {
    if sealed.len() < MIN_SEALED_FRAME_SIZE {
        return Err(CodecError::Authentication);
    }
    Frame::decode(&decrypt(sealed, key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KEY_SIZE;

    #[test]
    fn test_seal_open_frame() {
        let key = AdminKey::from_bytes(&[9u8; KEY_SIZE]).unwrap();
        let sealed = seal_frame(&key, 10, &[1, 2, 3]).unwrap();
        assert_eq!(sealed.len(), MIN_SEALED_FRAME_SIZE + 3);

        let frame = open_frame(&key, &sealed).unwrap();
        assert_eq!(frame, Frame::new(10, vec![1, 2, 3]));
        assert_eq!(frame.into_parts(), (10, vec![1, 2, 3]));
    }

    #[test]
    fn test_type_only_frame() {
        let key = AdminKey::from_bytes(&[9u8; KEY_SIZE]).unwrap();
        let sealed = seal_frame(&key, 255, &[]).unwrap();
        let frame = open_frame(&key, &sealed).unwrap();
        assert_eq!(frame.msg_type, 255);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_sealed_empty_plaintext_rejected() {
        let key = AdminKey::from_bytes(&[9u8; KEY_SIZE]).unwrap();
        // A validly sealed but empty plaintext is too short to be a frame.
        let sealed = encrypt(&[], &key).unwrap();
        assert_eq!(open_frame(&key, &sealed), Err(CodecError::Authentication));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(Frame::decode(&[]), Err(CodecError::EmptyFrame));
        assert_eq!(Frame::decode(&[7]).unwrap(), Frame::new(7, Vec::new()));
    }

    #[test]
    fn test_encode_decode() {
        let frame = Frame::new(3, b"{}".to_vec());
        assert_eq!(frame.encode(), b"\x03{}");
        assert_eq!(Frame::decode(&frame.encode()).unwrap(), frame);
    }
}
