//! Closed registry of admin message types.

use std::fmt;

use strum::{EnumIter, FromRepr, IntoStaticStr};

/// Admin message type, carried as the first byte of every frame.
///
/// Every variant owns a distinct byte. New types must take a previously
/// unused byte; 10..=19 are left free for ad-hoc handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum MessageType {
    Initialisation = 0,
    ListPeersRequest = 1,
    ListPeersResponse = 2,
    InspectPeerRequest = 3,
    InspectPeerResponse = 4,
    ChangePeerStatusRequest = 5,
    ListCidFrequencyRequest = 6,
    ListCidFrequencyResponse = 7,
    GetOfferByCidRequest = 8,
    GetOfferByCidResponse = 9,
    CacheOfferByDigestRequest = 20,
    ListFilesRequest = 21,
    ListFilesResponse = 22,
    PublishOfferRequest = 23,
    UploadFileRequest = 24,
    Ack = 255,
}

impl MessageType {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::from_repr(byte)
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Name of the registered type for `byte`, or `"unregistered"`.
    pub fn label(byte: u8) -> &'static str {
        Self::from_u8(byte).map_or("unregistered", Self::name)
    }
}

impl From<MessageType> for u8 {
    fn from(msg_type: MessageType) -> Self {
        msg_type.as_u8()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_bytes_are_unique() {
        let bytes: HashSet<u8> = MessageType::iter().map(MessageType::as_u8).collect();
        assert_eq!(bytes.len(), MessageType::iter().count());
    }

    #[test]
    fn test_from_u8() {
        for msg_type in MessageType::iter() {
            assert_eq!(MessageType::from_u8(msg_type.as_u8()), Some(msg_type));
        }
        for byte in 10..=19 {
            assert_eq!(MessageType::from_u8(byte), None);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(MessageType::ListPeersRequest.name(), "list_peers_request");
        assert_eq!(MessageType::label(255), "ack");
        assert_eq!(MessageType::label(12), "unregistered");
        assert_eq!(MessageType::Ack.to_string(), "ack(255)");
    }
}
