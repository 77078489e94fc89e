//! The structured packet exchanged over one multiplexed connection.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of a packet.
///
/// Serialized as its numeric wire tag (0–6) so the header stays compact
/// and stable across codec implementations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum PacketKind {
    /// Joins a namespace.
    Connect,
    /// Leaves a namespace.
    Disconnect,
    /// Application event with a JSON payload.
    Event,
    /// Acknowledgement for a previously sent event.
    Ack,
    /// The server rejected a namespace connect.
    ConnectError,
    /// Application event carrying binary attachments.
    BinaryEvent,
    /// Acknowledgement carrying binary attachments.
    BinaryAck,
}

impl From<PacketKind> for u8 {
    fn from(kind: PacketKind) -> u8 {
        match kind {
            PacketKind::Connect => 0,
            PacketKind::Disconnect => 1,
            PacketKind::Event => 2,
            PacketKind::Ack => 3,
            PacketKind::ConnectError => 4,
            PacketKind::BinaryEvent => 5,
            PacketKind::BinaryAck => 6,
        }
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(PacketKind::Connect),
            1 => Ok(PacketKind::Disconnect),
            2 => Ok(PacketKind::Event),
            3 => Ok(PacketKind::Ack),
            4 => Ok(PacketKind::ConnectError),
            5 => Ok(PacketKind::BinaryEvent),
            6 => Ok(PacketKind::BinaryAck),
            other => Err(format!("unknown packet kind tag: {other}")),
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PacketKind::Connect => "Connect",
            PacketKind::Disconnect => "Disconnect",
            PacketKind::Event => "Event",
            PacketKind::Ack => "Ack",
            PacketKind::ConnectError => "ConnectError",
            PacketKind::BinaryEvent => "BinaryEvent",
            PacketKind::BinaryAck => "BinaryAck",
        };
        write!(f, "{name}")
    }
}

/// One structured packet, addressed to a namespace.
///
/// The `id` field carries acknowledgement correlation for the namespace
/// layer; the connection manager transports it without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// What this packet is.
    pub kind: PacketKind,
    /// The namespace this packet belongs to. `/` is the root namespace.
    pub nsp: String,
    /// Optional acknowledgement id.
    pub id: Option<u64>,
    /// JSON payload.
    pub data: Value,
    /// Binary payloads carried alongside the JSON data.
    pub attachments: Vec<Vec<u8>>,
}

impl Packet {
    /// Creates an [`PacketKind::Event`] packet for `nsp`.
    ///
    /// Automatically upgrades to [`PacketKind::BinaryEvent`] when
    /// `attachments` is non-empty.
    pub fn event(
        nsp: impl Into<String>,
        data: Value,
        attachments: Vec<Vec<u8>>,
    ) -> Self {
        let kind = if attachments.is_empty() {
            PacketKind::Event
        } else {
            PacketKind::BinaryEvent
        };
        Self {
            kind,
            nsp: nsp.into(),
            id: None,
            data,
            attachments,
        }
    }

    /// Creates a [`PacketKind::Connect`] packet for `nsp`.
    pub fn connect(nsp: impl Into<String>) -> Self {
        Self {
            kind: PacketKind::Connect,
            nsp: nsp.into(),
            id: None,
            data: Value::Null,
            attachments: Vec::new(),
        }
    }

    /// Creates a [`PacketKind::Disconnect`] packet for `nsp`.
    pub fn disconnect(nsp: impl Into<String>) -> Self {
        Self {
            kind: PacketKind::Disconnect,
            nsp: nsp.into(),
            id: None,
            data: Value::Null,
            attachments: Vec::new(),
        }
    }

    /// Returns `true` if this packet carries binary attachments.
    pub fn is_binary(&self) -> bool {
        matches!(
            self.kind,
            PacketKind::BinaryEvent | PacketKind::BinaryAck
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_packet_kind_tag_round_trip() {
        for tag in 0u8..=6 {
            let kind = PacketKind::try_from(tag).expect("valid tag");
            assert_eq!(u8::from(kind), tag);
        }
    }

    #[test]
    fn test_packet_kind_rejects_unknown_tag() {
        assert!(PacketKind::try_from(7).is_err());
    }

    #[test]
    fn test_event_without_attachments_is_plain_event() {
        let p = Packet::event("/chat", json!(["msg", "hi"]), vec![]);
        assert_eq!(p.kind, PacketKind::Event);
        assert!(!p.is_binary());
    }

    #[test]
    fn test_event_with_attachments_upgrades_to_binary() {
        let p = Packet::event("/chat", json!(["blob"]), vec![vec![1, 2]]);
        assert_eq!(p.kind, PacketKind::BinaryEvent);
        assert!(p.is_binary());
    }

    #[test]
    fn test_connect_and_disconnect_constructors() {
        assert_eq!(Packet::connect("/").kind, PacketKind::Connect);
        assert_eq!(
            Packet::disconnect("/chat").kind,
            PacketKind::Disconnect
        );
        assert_eq!(Packet::disconnect("/chat").nsp, "/chat");
    }
}
