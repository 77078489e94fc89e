//! Namespace channels multiplexed over one managed connection.
//!
//! A [`Socket`] is a lightweight handle to one namespace: it submits
//! packets through its manager and receives the packets the manager
//! dispatches to its namespace. It never owns the transport.

use std::sync::Arc;

use serde_json::{json, Value};

use filament_parser::{Decoder, Encoder, Packet};
use filament_transport::Transport;

use crate::manager::SharedRef;
use crate::{ClientError, Emitter, SubscriptionId};

/// Per-namespace internals held in the manager's registry.
///
/// Shared between every [`Socket`] handle for the namespace and the
/// manager's dispatch path.
pub(crate) struct SocketCore {
    nsp: String,
    handlers: Emitter<(), Packet>,
}

impl SocketCore {
    pub(crate) fn new(nsp: String) -> Self {
        Self {
            nsp,
            handlers: Emitter::new(),
        }
    }

    /// Delivers one inbound packet to every registered handler.
    pub(crate) fn dispatch(&self, packet: &Packet) {
        tracing::trace!(nsp = %self.nsp, kind = %packet.kind, "dispatching packet");
        self.handlers.emit((), packet);
    }
}

/// A handle to one namespace on a managed connection.
///
/// Obtained from [`Manager::socket`](crate::Manager::socket). Cheap to
/// clone; clones share the namespace's handler registry. The handle
/// holds a weak reference to its manager, so an outstanding `Socket`
/// never keeps a dropped manager alive.
pub struct Socket<T: Transport, E: Encoder, D: Decoder> {
    core: Arc<SocketCore>,
    manager: SharedRef<T, E, D>,
}

impl<T: Transport, E: Encoder, D: Decoder> Clone for Socket<T, E, D> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            manager: self.manager.clone(),
        }
    }
}

impl<T: Transport, E: Encoder, D: Decoder> Socket<T, E, D> {
    pub(crate) fn new(core: Arc<SocketCore>, manager: SharedRef<T, E, D>) -> Self {
        Self { core, manager }
    }

    /// The namespace this channel is bound to.
    pub fn nsp(&self) -> &str {
        &self.core.nsp
    }

    /// Subscribes a handler to packets addressed to this namespace.
    pub fn on_packet(
        &self,
        handler: impl Fn(&Packet) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.core.handlers.on((), handler)
    }

    /// Removes a previously registered packet handler.
    pub fn off(&self, id: SubscriptionId) -> bool {
        self.core.handlers.off(id)
    }

    /// Sends a namespace connect request.
    pub fn connect(&self) -> Result<(), ClientError> {
        self.packet(Packet::connect(self.nsp()))
    }

    /// Emits an application event with a JSON payload.
    pub fn emit_event(
        &self,
        event: &str,
        data: Value,
    ) -> Result<(), ClientError> {
        self.packet(Packet::event(self.nsp(), json!([event, data]), vec![]))
    }

    /// Emits an application event carrying binary attachments.
    pub fn emit_binary(
        &self,
        event: &str,
        data: Value,
        attachments: Vec<Vec<u8>>,
    ) -> Result<(), ClientError> {
        self.packet(Packet::event(
            self.nsp(),
            json!([event, data]),
            attachments,
        ))
    }

    /// Submits a raw packet for this namespace through the manager.
    ///
    /// # Errors
    /// Returns [`ClientError::Closed`] if the manager has been dropped,
    /// or [`ClientError::NotOpen`] if the connection is not open.
    pub fn packet(&self, packet: Packet) -> Result<(), ClientError> {
        let shared = self.manager.upgrade().ok_or(ClientError::Closed)?;
        crate::manager::Shared::submit_packet(&shared, packet)
    }

    /// Leaves the namespace: sends a best-effort disconnect packet and
    /// removes this namespace from the manager's registry. The manager
    /// closes once its last namespace is gone.
    pub fn disconnect(&self) {
        // The disconnect packet is a courtesy; the registry removal is
        // the authoritative part.
        let _ = self.packet(Packet::disconnect(self.nsp()));
        if let Some(shared) = self.manager.upgrade() {
            crate::manager::Shared::destroy_nsp(&shared, self.nsp());
        }
    }
}
