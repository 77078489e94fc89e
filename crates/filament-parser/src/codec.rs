//! Encoder/decoder traits and the default JSON codec.
//!
//! Encoding may be asynchronous: a packet with binary attachments is
//! emitted as several frames, and future codecs may need real async work
//! (compression, chunked payloads). The manager serializes encodes, so an
//! implementation never sees two `encode` calls in flight at once.
//!
//! Decoding is a push interface: the manager feeds every inbound frame to
//! the decoder and forwards whatever completed packets come out.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use filament_transport::Frame;

use crate::{Packet, PacketKind, ParseError};

/// Upper bound on declared attachments per packet. A header claiming
/// more than this is rejected rather than buffered.
const MAX_ATTACHMENTS: usize = 255;

/// Turns packets into ordered wire frames.
pub trait Encoder: Send + Sync + 'static {
    /// Encodes one packet into its wire frames, in emission order.
    ///
    /// # Errors
    /// Returns [`ParseError::Encode`] if the packet cannot be
    /// serialized.
    fn encode(
        &self,
        packet: Packet,
    ) -> impl Future<Output = Result<Vec<Frame>, ParseError>> + Send;
}

/// Reassembles packets from inbound wire frames.
///
/// Implementations are stateful: a multi-frame packet is held internally
/// until complete. [`Decoder::reset`] discards that partial state — the
/// manager calls it whenever a connection is torn down.
pub trait Decoder: Send + 'static {
    /// Feeds one inbound frame; returns every packet completed by it.
    fn feed(&mut self, frame: Frame) -> Result<Vec<Packet>, ParseError>;

    /// Discards any partially reassembled packet.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// JSON codec
// ---------------------------------------------------------------------------

/// The header frame layout: the packet minus its attachment bytes, plus
/// the attachment count the peer should expect.
#[derive(Debug, Serialize, Deserialize)]
struct Header {
    #[serde(rename = "type")]
    kind: PacketKind,
    #[serde(default = "root_nsp")]
    nsp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    attachments: usize,
}

fn root_nsp() -> String {
    "/".to_string()
}

/// The default [`Encoder`]: one JSON text header frame, followed by one
/// binary frame per attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    async fn encode(&self, packet: Packet) -> Result<Vec<Frame>, ParseError> {
        let header = Header {
            kind: packet.kind,
            nsp: packet.nsp,
            id: packet.id,
            data: packet.data,
            attachments: packet.attachments.len(),
        };
        let text =
            serde_json::to_string(&header).map_err(ParseError::Encode)?;

        let mut frames = Vec::with_capacity(1 + packet.attachments.len());
        frames.push(Frame::Text(text));
        frames.extend(packet.attachments.into_iter().map(Frame::Binary));
        Ok(frames)
    }
}

/// The default [`Decoder`], counterpart of [`JsonEncoder`].
#[derive(Debug, Default)]
pub struct JsonDecoder {
    /// A packet whose header has arrived but whose attachments have not.
    pending: Option<PendingPacket>,
}

#[derive(Debug)]
struct PendingPacket {
    packet: Packet,
    expected: usize,
}

impl JsonDecoder {
    /// Creates a fresh decoder with no partial state.
    pub fn new() -> Self {
        Self::default()
    }

    fn feed_header(&mut self, text: &str) -> Result<Vec<Packet>, ParseError> {
        let header: Header =
            serde_json::from_str(text).map_err(ParseError::Decode)?;

        if header.attachments > MAX_ATTACHMENTS {
            return Err(ParseError::TooManyAttachments(header.attachments));
        }

        let packet = Packet {
            kind: header.kind,
            nsp: header.nsp,
            id: header.id,
            data: header.data,
            attachments: Vec::with_capacity(header.attachments),
        };

        if header.attachments == 0 {
            return Ok(vec![packet]);
        }

        self.pending = Some(PendingPacket {
            packet,
            expected: header.attachments,
        });
        Ok(Vec::new())
    }
}

impl Decoder for JsonDecoder {
    fn feed(&mut self, frame: Frame) -> Result<Vec<Packet>, ParseError> {
        match frame {
            Frame::Text(text) => {
                if self.pending.take().is_some() {
                    // The peer abandoned a binary packet mid-flight.
                    // Drop the partial packet and keep decoding.
                    tracing::warn!(
                        "header frame interrupted attachment reassembly; \
                         dropping partial packet"
                    );
                }
                self.feed_header(&text)
            }
            Frame::Binary(data) => {
                let Some(mut pending) = self.pending.take() else {
                    return Err(ParseError::UnexpectedBinary);
                };
                pending.packet.attachments.push(data);
                if pending.packet.attachments.len() == pending.expected {
                    Ok(vec![pending.packet])
                } else {
                    self.pending = Some(pending);
                    Ok(Vec::new())
                }
            }
        }
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn encode(packet: Packet) -> Vec<Frame> {
        JsonEncoder
            .encode(packet)
            .await
            .expect("encode should succeed")
    }

    #[tokio::test]
    async fn test_encode_plain_event_yields_single_text_frame() {
        let frames =
            encode(Packet::event("/chat", json!(["hi"]), vec![])).await;
        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], Frame::Text(_)));
    }

    #[tokio::test]
    async fn test_encode_binary_event_yields_header_plus_attachments() {
        let frames = encode(Packet::event(
            "/chat",
            json!(["blob"]),
            vec![vec![1], vec![2, 3]],
        ))
        .await;
        assert_eq!(frames.len(), 3);
        assert!(matches!(frames[0], Frame::Text(_)));
        assert_eq!(frames[1], Frame::Binary(vec![1]));
        assert_eq!(frames[2], Frame::Binary(vec![2, 3]));
    }

    #[tokio::test]
    async fn test_feed_plain_event_completes_immediately() {
        let original = Packet::event("/chat", json!(["hi", 42]), vec![]);
        let frames = encode(original.clone()).await;

        let mut decoder = JsonDecoder::new();
        let packets = decoder.feed(frames[0].clone()).unwrap();
        assert_eq!(packets, vec![original]);
    }

    #[tokio::test]
    async fn test_feed_binary_event_held_until_all_attachments() {
        let original = Packet::event(
            "/files",
            json!(["upload"]),
            vec![vec![9, 9], vec![7]],
        );
        let frames = encode(original.clone()).await;

        let mut decoder = JsonDecoder::new();
        assert!(decoder.feed(frames[0].clone()).unwrap().is_empty());
        assert!(decoder.feed(frames[1].clone()).unwrap().is_empty());
        let packets = decoder.feed(frames[2].clone()).unwrap();
        assert_eq!(packets, vec![original]);
    }

    #[test]
    fn test_feed_malformed_header_returns_decode_error() {
        let mut decoder = JsonDecoder::new();
        let result = decoder.feed(Frame::Text("{not json".into()));
        assert!(matches!(result, Err(ParseError::Decode(_))));
    }

    #[test]
    fn test_feed_unexpected_binary_returns_error() {
        let mut decoder = JsonDecoder::new();
        let result = decoder.feed(Frame::Binary(vec![1, 2, 3]));
        assert!(matches!(result, Err(ParseError::UnexpectedBinary)));
    }

    #[tokio::test]
    async fn test_feed_error_does_not_poison_decoder() {
        let mut decoder = JsonDecoder::new();
        let _ = decoder.feed(Frame::Binary(vec![0]));

        let good = Packet::event("/", json!(["ok"]), vec![]);
        let frames = encode(good.clone()).await;
        let packets = decoder.feed(frames[0].clone()).unwrap();
        assert_eq!(packets, vec![good]);
    }

    #[tokio::test]
    async fn test_feed_header_during_reassembly_drops_partial_packet() {
        let binary =
            Packet::event("/files", json!(["upload"]), vec![vec![1]]);
        let binary_frames = encode(binary).await;

        let mut decoder = JsonDecoder::new();
        assert!(decoder.feed(binary_frames[0].clone()).unwrap().is_empty());

        // A fresh header arrives before the attachment.
        let replacement = Packet::event("/chat", json!(["hi"]), vec![]);
        let frames = encode(replacement.clone()).await;
        let packets = decoder.feed(frames[0].clone()).unwrap();
        assert_eq!(packets, vec![replacement]);

        // The abandoned packet's attachment is now unexpected.
        let result = decoder.feed(binary_frames[1].clone());
        assert!(matches!(result, Err(ParseError::UnexpectedBinary)));
    }

    #[tokio::test]
    async fn test_reset_discards_partial_state() {
        let binary =
            Packet::event("/files", json!(["upload"]), vec![vec![1]]);
        let frames = encode(binary).await;

        let mut decoder = JsonDecoder::new();
        assert!(decoder.feed(frames[0].clone()).unwrap().is_empty());
        decoder.reset();

        let result = decoder.feed(frames[1].clone());
        assert!(matches!(result, Err(ParseError::UnexpectedBinary)));
    }

    #[test]
    fn test_feed_header_missing_nsp_defaults_to_root() {
        let mut decoder = JsonDecoder::new();
        let packets = decoder
            .feed(Frame::Text(r#"{"type":2,"data":["hi"]}"#.into()))
            .unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].nsp, "/");
        assert_eq!(packets[0].kind, PacketKind::Event);
    }

    #[test]
    fn test_feed_header_with_excessive_attachments_rejected() {
        let mut decoder = JsonDecoder::new();
        let result = decoder.feed(Frame::Text(
            r#"{"type":5,"nsp":"/","data":[],"attachments":1000}"#.into(),
        ));
        assert!(matches!(result, Err(ParseError::TooManyAttachments(1000))));
    }
}
