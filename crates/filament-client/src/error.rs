//! Unified error type for the client crate.

use std::time::Duration;

/// Errors surfaced by the connection manager's fallible operations.
///
/// Failures of asynchronous flows (connects, reconnects, transport
/// errors mid-connection) are reported through emitted events, not
/// through this type — see the crate docs. `ClientError` covers the
/// synchronous contract violations and is the payload of open
/// callbacks.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A write was attempted while the connection was not open.
    #[error("connection is not open")]
    NotOpen,

    /// The manager (or its last owner) has been torn down.
    #[error("manager is closed")]
    Closed,

    /// The connect attempt did not complete within the configured bound.
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),

    /// A transport error, stringified because the transport type is
    /// generic.
    #[error("transport: {0}")]
    Transport(String),
}
