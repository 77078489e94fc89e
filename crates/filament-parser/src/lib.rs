//! Packet model and wire codecs for Filament.
//!
//! This crate defines the structured [`Packet`] that namespace channels
//! exchange, and the [`Encoder`] / [`Decoder`] traits the connection
//! manager drives. The codec contract is deliberately asymmetric:
//!
//! - encoding turns one packet into an **ordered sequence** of wire
//!   frames (a packet with binary attachments becomes a header frame
//!   followed by one binary frame per attachment), and may be
//!   asynchronous;
//! - decoding is stateful and incremental — each inbound frame yields
//!   zero or more completed packets, in arrival order.
//!
//! [`JsonEncoder`] / [`JsonDecoder`] are the development defaults. The
//! manager never assumes this layout; swap in another codec by
//! implementing the two traits.

mod codec;
mod error;
mod types;

pub use codec::{Decoder, Encoder, JsonDecoder, JsonEncoder};
pub use error::ParseError;
pub use types::{Packet, PacketKind};
