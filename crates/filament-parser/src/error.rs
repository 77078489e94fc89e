//! Error types for the packet codec layer.

/// Errors that can occur while encoding or decoding packets.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Serializing a packet to its wire form failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A header frame did not parse as a packet.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A binary frame arrived while no packet was awaiting attachments.
    #[error("unexpected binary frame")]
    UnexpectedBinary,

    /// The packet declares more attachments than the decoder allows.
    #[error("too many attachments: {0}")]
    TooManyAttachments(usize),
}
