//! # Filament client
//!
//! The connection manager for a namespaced, multiplexed real-time
//! messaging protocol. One [`Manager`] owns exactly one transport
//! connection per remote endpoint and multiplexes any number of
//! namespace channels ([`Socket`]) over it.
//!
//! The manager's three jobs, and how they interact, are the heart of
//! this crate:
//!
//! - **Connection lifecycle**: a `closed → opening → open → closed`
//!   state machine driven by transport notifications that arrive outside
//!   the caller's control.
//! - **Packet pipeline**: outbound packets pass through an encode gate —
//!   at most one codec encode is in flight at a time, everything else
//!   queues FIFO — so multi-frame encodes never interleave on the wire.
//! - **Reconnection**: exponential backoff with jitter and a retry
//!   budget, cancelled cleanly by an explicit close.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use filament_client::{Manager, ManagerEventKind, ManagerOptions};
//! use filament_parser::{JsonDecoder, JsonEncoder};
//! use filament_transport::WebSocketTransport;
//!
//! # async fn run() {
//! let manager = Manager::new(
//!     WebSocketTransport,
//!     JsonEncoder,
//!     JsonDecoder::new(),
//!     "http://localhost:3000",
//!     ManagerOptions::default(),
//! );
//!
//! manager.on(ManagerEventKind::Open, |_| println!("connected"));
//! let chat = manager.socket("/chat");
//! manager.open();
//! # }
//! ```

mod backoff;
mod emitter;
mod error;
mod manager;
mod options;
mod socket;

pub use backoff::Backoff;
pub use emitter::{Emitter, SubscriptionId};
pub use error::ClientError;
pub use manager::{
    Manager, ManagerEvent, ManagerEventKind, OpenCallback, ReadyState,
};
pub use options::ManagerOptions;
pub use socket::Socket;
