//! Client-side transport abstraction for Filament.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! different bidirectional message channels (WebSocket today, WebTransport
//! later). The connection manager in `filament-client` depends only on
//! these traits, never on a concrete transport.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

mod error;
mod url;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use url::build_ws_url;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::future::Future;

/// The unit a transport carries: one complete wire message.
///
/// Transports that distinguish text from binary frames (WebSocket) map
/// the distinction directly; byte-oriented transports may treat both as
/// opaque payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A UTF-8 text message.
    Text(String),
    /// A binary message.
    Binary(Vec<u8>),
}

impl Frame {
    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        match self {
            Frame::Text(s) => s.len(),
            Frame::Binary(b) => b.len(),
        }
    }

    /// Returns `true` if the frame carries no payload.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Connection-level options understood by every transport.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// The endpoint path appended to the URI. Default: `/socket.io`.
    pub path: String,
    /// Extra query string appended verbatim (without leading `?` or `&`).
    pub query: Option<String>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            path: "/socket.io".to_string(),
            query: None,
        }
    }
}

/// Establishes outbound connections to a remote endpoint.
///
/// One logical connection at a time is the caller's concern — the
/// transport itself is stateless and may be asked to connect again after
/// a previous connection died.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for connect failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Opens a new connection to `uri`.
    ///
    /// Resolving successfully is the transport's `open` notification;
    /// resolving with an error is its `error` notification.
    fn connect(
        &self,
        uri: &str,
        opts: &ConnectOptions,
    ) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send;
}

/// A single live connection that can send and receive frames.
///
/// `send` and `recv` must not block each other: the manager runs a
/// dedicated read loop while writes happen from encode tasks.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one frame to the remote peer.
    fn send(
        &self,
        frame: &Frame,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receives the next frame from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(
        &self,
    ) -> impl Future<Output = Result<Option<Frame>, Self::Error>> + Send;

    /// Closes the connection.
    fn close(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_len_counts_bytes() {
        assert_eq!(Frame::Text("abc".into()).len(), 3);
        assert_eq!(Frame::Binary(vec![1, 2, 3, 4]).len(), 4);
    }

    #[test]
    fn test_frame_is_empty() {
        assert!(Frame::Text(String::new()).is_empty());
        assert!(!Frame::Binary(vec![0]).is_empty());
    }

    #[test]
    fn test_connect_options_default_path() {
        let opts = ConnectOptions::default();
        assert_eq!(opts.path, "/socket.io");
        assert!(opts.query.is_none());
    }
}
