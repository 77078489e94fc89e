//! The connection manager: lifecycle state machine, packet pipeline,
//! and reconnection policy.
//!
//! One `Manager` per remote endpoint. It owns the current transport
//! connection exclusively; namespace channels never touch the transport
//! or the decoder directly, only the manager's packet/dispatch surface.
//! That exclusive ownership is what makes multiplexing safe without any
//! additional locking.
//!
//! # Execution model
//!
//! All waits are futures: the connect attempt, the per-connection read
//! loop, encode jobs, and reconnect timers each run in their own spawned
//! task. Shared state lives behind a synchronous mutex that is never
//! held across an await, and events are emitted after the lock is
//! released.
//!
//! A connection and everything bound to it are scoped to a single open
//! attempt by a monotonically increasing **generation** counter: every
//! task records the generation it was spawned under, and any outcome
//! tagged with a stale generation is discarded. `cleanup()` plus the
//! generation bump on close is what guarantees that no stale
//! subscription can fire against a superseded connection.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use filament_parser::{Decoder, Encoder, Packet};
use filament_transport::{Connection, Frame, Transport};

use crate::socket::{Socket, SocketCore};
use crate::{Backoff, ClientError, Emitter, ManagerOptions, SubscriptionId};

/// Connection status. The single source of truth for what the manager
/// is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// No connection. Initial state, and terminal after an explicit
    /// close.
    Closed,
    /// A connect attempt is in flight.
    Opening,
    /// The connection is live.
    Open,
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyState::Closed => write!(f, "closed"),
            ReadyState::Opening => write!(f, "opening"),
            ReadyState::Open => write!(f, "open"),
        }
    }
}

/// Events emitted by the manager.
#[derive(Debug, Clone)]
pub enum ManagerEvent {
    /// The connection is open.
    Open,
    /// A transport or codec error on a live connection.
    Error(String),
    /// The connection closed, with a reason.
    Close(String),
    /// A packet was decoded from the wire.
    Packet(Packet),
    /// A connect attempt failed.
    ConnectError(String),
    /// A connect attempt hit the configured timeout.
    ConnectTimeout(Duration),
    /// A reconnect was scheduled; carries the attempt number (1-based).
    ReconnectAttempt(u32),
    /// A reconnect succeeded; carries the attempt number that won.
    Reconnect(u32),
    /// The retry budget is exhausted. Terminal for this cycle — a
    /// manual `open()` starts a fresh one.
    ReconnectFailed,
}

/// Discriminant used to subscribe to one kind of [`ManagerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerEventKind {
    Open,
    Error,
    Close,
    Packet,
    ConnectError,
    ConnectTimeout,
    ReconnectAttempt,
    Reconnect,
    ReconnectFailed,
}

impl ManagerEvent {
    /// The kind of this event.
    pub fn kind(&self) -> ManagerEventKind {
        match self {
            ManagerEvent::Open => ManagerEventKind::Open,
            ManagerEvent::Error(_) => ManagerEventKind::Error,
            ManagerEvent::Close(_) => ManagerEventKind::Close,
            ManagerEvent::Packet(_) => ManagerEventKind::Packet,
            ManagerEvent::ConnectError(_) => ManagerEventKind::ConnectError,
            ManagerEvent::ConnectTimeout(_) => {
                ManagerEventKind::ConnectTimeout
            }
            ManagerEvent::ReconnectAttempt(_) => {
                ManagerEventKind::ReconnectAttempt
            }
            ManagerEvent::Reconnect(_) => ManagerEventKind::Reconnect,
            ManagerEvent::ReconnectFailed => ManagerEventKind::ReconnectFailed,
        }
    }
}

/// Callback passed to [`Manager::open_with`]; invoked once with the
/// outcome of that open attempt.
pub type OpenCallback = Box<dyn FnOnce(Result<(), ClientError>) + Send>;

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// The connection manager. Cheap to clone; all clones share one
/// underlying connection.
pub struct Manager<T: Transport, E: Encoder, D: Decoder> {
    shared: Arc<Shared<T, E, D>>,
}

impl<T: Transport, E: Encoder, D: Decoder> Clone for Manager<T, E, D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// State shared between the manager handle and its spawned tasks.
pub(crate) struct Shared<T: Transport, E: Encoder, D: Decoder> {
    uri: String,
    opts: ManagerOptions,
    transport: T,
    encoder: E,
    events: Emitter<ManagerEventKind, ManagerEvent>,
    state: Mutex<State<T::Connection, D>>,
}

/// Mutable manager state. Guarded by a synchronous mutex; never held
/// across an await.
struct State<C, D> {
    ready_state: ReadyState,
    /// The current connection. Replaced, never mutated, on reconnect.
    conn: Option<Arc<C>>,
    /// Open-attempt epoch. Bumped on every `open()` and every close;
    /// task outcomes tagged with a stale generation are discarded.
    generation: u64,
    /// The read loop bound to the current connection.
    reader: Option<tokio::task::JoinHandle<()>>,
    decoder: D,
    /// Encode gate: at most one encode outstanding at any time.
    encoding: bool,
    /// Packets awaiting encode, in submission order.
    packet_buffer: VecDeque<Packet>,
    /// Namespace name → channel internals.
    nsps: HashMap<String, Arc<SocketCore>>,
    backoff: Backoff,
    /// A reconnect is scheduled or in flight.
    reconnecting: bool,
    /// Set by an explicit close; suppresses any further reconnection.
    skip_reconnect: bool,
    reconnect_timer: Option<tokio::task::JoinHandle<()>>,
}

impl<C, D: Decoder> State<C, D> {
    /// Unconditional, idempotent teardown of per-connection state:
    /// unbinds the read loop, clears the encode gate, abandons buffered
    /// packets, and resets decoder reassembly. Does not touch
    /// `ready_state` or `nsps`.
    fn cleanup(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.encoding = false;
        self.packet_buffer.clear();
        self.decoder.reset();
    }
}

impl<T: Transport, E: Encoder, D: Decoder> Manager<T, E, D> {
    /// Creates a manager for `uri`.
    ///
    /// Construction does not connect — call [`open`](Self::open). The
    /// endpoint and options are immutable afterwards.
    pub fn new(
        transport: T,
        encoder: E,
        decoder: D,
        uri: impl Into<String>,
        opts: ManagerOptions,
    ) -> Self {
        let backoff = Backoff::new(
            opts.reconnection_delay,
            opts.reconnection_delay_max,
            2.0,
            opts.randomization_factor,
        );
        Self {
            shared: Arc::new(Shared {
                uri: uri.into(),
                opts,
                transport,
                encoder,
                events: Emitter::new(),
                state: Mutex::new(State {
                    ready_state: ReadyState::Closed,
                    conn: None,
                    generation: 0,
                    reader: None,
                    decoder,
                    encoding: false,
                    packet_buffer: VecDeque::new(),
                    nsps: HashMap::new(),
                    backoff,
                    reconnecting: false,
                    skip_reconnect: false,
                    reconnect_timer: None,
                }),
            }),
        }
    }

    /// The endpoint this manager connects to.
    pub fn uri(&self) -> &str {
        &self.shared.uri
    }

    /// Current connection status.
    pub fn ready_state(&self) -> ReadyState {
        self.shared.state.lock().expect("state lock poisoned").ready_state
    }

    /// Subscribes a handler to one kind of manager event.
    pub fn on(
        &self,
        kind: ManagerEventKind,
        handler: impl Fn(&ManagerEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.shared.events.on(kind, handler)
    }

    /// Removes a previously registered handler.
    pub fn off(&self, id: SubscriptionId) -> bool {
        self.shared.events.off(id)
    }

    /// Starts a connect attempt.
    ///
    /// No-op if the manager is already `opening` or `open`; at most one
    /// transport connection exists at a time. Never blocks — the
    /// outcome arrives as an `Open` or `ConnectError` event.
    pub fn open(&self) -> &Self {
        Shared::open(&self.shared, None);
        self
    }

    /// Like [`open`](Self::open), with a callback for this attempt's
    /// outcome. The callback is dropped unused if the call is a no-op.
    pub fn open_with(&self, callback: OpenCallback) -> &Self {
        Shared::open(&self.shared, Some(callback));
        self
    }

    /// Caller-initiated close: tears down subscriptions, forces the
    /// transport closed, and cancels any pending reconnect. Does not
    /// trigger reconnection.
    pub fn close(&self) {
        Shared::close(&self.shared);
    }

    /// Submits a packet for transmission.
    ///
    /// Packets submitted while an encode is in flight are buffered and
    /// written in submission order.
    ///
    /// # Errors
    /// Returns [`ClientError::NotOpen`] if the connection is not open —
    /// writing while closed is a contract violation, not a queueing
    /// request.
    pub fn packet(&self, packet: Packet) -> Result<(), ClientError> {
        Shared::packet(&self.shared, packet)
    }

    /// Returns the channel for namespace `nsp`, creating it on first
    /// request. Creation is lazy with respect to the connection: it
    /// does not force an open.
    pub fn socket(&self, nsp: &str) -> Socket<T, E, D> {
        let core = {
            let mut st = self.shared.state.lock().expect("state lock poisoned");
            let core = st.nsps.entry(nsp.to_string()).or_insert_with(|| {
                tracing::debug!(nsp, "creating namespace channel");
                Arc::new(SocketCore::new(nsp.to_string()))
            });
            Arc::clone(core)
        };
        Socket::new(core, Arc::downgrade(&self.shared))
    }

    /// Removes bookkeeping for a namespace channel that has fully
    /// disconnected. When no channels remain the manager closes.
    pub fn destroy(&self, socket: &Socket<T, E, D>) {
        Shared::destroy(&self.shared, socket.nsp());
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

impl<T: Transport, E: Encoder, D: Decoder> Shared<T, E, D> {
    fn emit(&self, event: ManagerEvent) {
        self.events.emit(event.kind(), &event);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.lock().expect("state lock poisoned").generation
            == generation
    }

    fn emit_if_current(&self, generation: u64, event: ManagerEvent) {
        if self.is_current(generation) {
            self.emit(event);
        }
    }

    // -- Connection state machine -------------------------------------

    /// Returns `true` if a connect attempt was actually started, `false`
    /// if the call was a no-op because a connection is already active.
    fn open(this: &Arc<Self>, callback: Option<OpenCallback>) -> bool {
        let generation = {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.ready_state != ReadyState::Closed {
                tracing::debug!(
                    state = %st.ready_state,
                    "open ignored; connection already active"
                );
                return false;
            }
            st.ready_state = ReadyState::Opening;
            st.skip_reconnect = false;
            st.generation += 1;
            st.generation
        };

        tracing::debug!(uri = %this.uri, "opening connection");
        let task = Arc::clone(this);
        tokio::spawn(async move {
            Shared::connect_task(task, generation, callback).await;
        });
        true
    }

    async fn connect_task(
        this: Arc<Self>,
        generation: u64,
        callback: Option<OpenCallback>,
    ) {
        let connect_opts = this.opts.connect_options();
        let connect = this.transport.connect(&this.uri, &connect_opts);

        let result = match this.opts.timeout {
            Some(limit) => match tokio::time::timeout(limit, connect).await {
                Ok(outcome) => {
                    outcome.map_err(|e| ClientError::Transport(e.to_string()))
                }
                Err(_) => {
                    tracing::debug!(
                        timeout_ms = limit.as_millis() as u64,
                        "connect attempt timed out"
                    );
                    Err(ClientError::Timeout(limit))
                }
            },
            None => connect
                .await
                .map_err(|e| ClientError::Transport(e.to_string())),
        };

        match result {
            Ok(conn) => {
                Shared::on_open(&this, generation, Arc::new(conn), callback);
            }
            Err(err) => {
                Shared::on_connect_error(&this, generation, err, callback);
            }
        }
    }

    /// Called when the transport reports open for attempt `generation`.
    fn on_open(
        this: &Arc<Self>,
        generation: u64,
        conn: Arc<T::Connection>,
        callback: Option<OpenCallback>,
    ) {
        let reconnected_after = {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.generation != generation {
                // Superseded by close(); discard the late connection.
                tokio::spawn(async move {
                    let _ = conn.close().await;
                });
                return;
            }

            // Defensive reset of anything left over from a previous
            // connection.
            st.cleanup();
            st.ready_state = ReadyState::Open;
            st.conn = Some(Arc::clone(&conn));

            if st.reconnecting {
                st.reconnecting = false;
                let attempts = st.backoff.attempts();
                st.backoff.reset();
                Some(attempts)
            } else {
                None
            }
        };

        tracing::debug!("connection open");
        this.emit(ManagerEvent::Open);

        // Bind the steady-state subscription: one read loop per
        // connection, scoped to this generation.
        {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.generation == generation
                && st.ready_state == ReadyState::Open
            {
                let task = Arc::clone(this);
                let reader_conn = Arc::clone(&conn);
                st.reader = Some(tokio::spawn(async move {
                    Shared::read_loop(task, generation, reader_conn).await;
                }));
            }
        }

        if let Some(attempts) = reconnected_after {
            tracing::info!(attempts, "reconnected");
            this.emit(ManagerEvent::Reconnect(attempts));
        }

        if let Some(cb) = callback {
            cb(Ok(()));
        }
    }

    /// Called when the connect attempt for `generation` fails.
    fn on_connect_error(
        this: &Arc<Self>,
        generation: u64,
        err: ClientError,
        callback: Option<OpenCallback>,
    ) {
        let was_reconnecting = {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.generation != generation {
                return;
            }
            tracing::debug!(error = %err, "connect error");
            st.cleanup();
            st.conn = None;
            st.ready_state = ReadyState::Closed;
            st.reconnecting
        };

        // A timeout is surfaced as its own event, then treated as a
        // connect error for the rest of the pipeline.
        if let ClientError::Timeout(limit) = &err {
            this.emit(ManagerEvent::ConnectTimeout(*limit));
        }
        this.emit(ManagerEvent::ConnectError(err.to_string()));

        if let Some(cb) = callback {
            cb(Err(err));
        }

        // The reconnect flow handles its own retries through the open
        // callback; only a cold open starts the policy from here.
        if this.opts.reconnection && !was_reconnecting {
            Shared::maybe_reconnect(this);
        }
    }

    /// Steady-state subscription: pumps transport frames into the
    /// decoder until the connection dies.
    async fn read_loop(
        this: Arc<Self>,
        generation: u64,
        conn: Arc<T::Connection>,
    ) {
        loop {
            match conn.recv().await {
                Ok(Some(frame)) => this.on_data(generation, frame),
                Ok(None) => {
                    Shared::on_close(&this, generation, "transport close");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "transport error");
                    this.emit_if_current(
                        generation,
                        ManagerEvent::Error(e.to_string()),
                    );
                    // A dead read stream cannot deliver anything more;
                    // error implies close for this transport model.
                    Shared::on_close(&this, generation, "transport error");
                    break;
                }
            }
        }
    }

    /// Feeds one inbound frame to the decoder and dispatches whatever
    /// packets complete.
    fn on_data(&self, generation: u64, frame: Frame) {
        let decoded = {
            let mut st = self.state.lock().expect("state lock poisoned");
            if st.generation != generation {
                return;
            }
            st.decoder.feed(frame)
        };

        match decoded {
            Ok(packets) => {
                for packet in packets {
                    self.on_decoded(packet);
                }
            }
            Err(e) => {
                // Malformed inbound data is isolated by the decoder;
                // the connection stays up.
                tracing::debug!(error = %e, "failed to decode frame");
                self.emit(ManagerEvent::Error(e.to_string()));
            }
        }
    }

    /// Dispatches one fully decoded packet by namespace.
    fn on_decoded(&self, packet: Packet) {
        let channel = {
            let st = self.state.lock().expect("state lock poisoned");
            st.nsps.get(&packet.nsp).map(Arc::clone)
        };

        self.emit(ManagerEvent::Packet(packet.clone()));

        if let Some(channel) = channel {
            channel.dispatch(&packet);
        } else {
            tracing::trace!(nsp = %packet.nsp, "packet for unknown namespace");
        }
    }

    /// Called when the transport reports close for `generation`.
    fn on_close(this: &Arc<Self>, generation: u64, reason: &str) {
        {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.generation != generation {
                return;
            }
            tracing::debug!(reason, "connection closed");
            st.cleanup();
            st.conn = None;
            st.ready_state = ReadyState::Closed;
            // Invalidate anything still tagged with the dead epoch.
            st.generation += 1;
        }

        this.emit(ManagerEvent::Close(reason.to_string()));

        if this.opts.reconnection {
            Shared::maybe_reconnect(this);
        }
    }

    /// Caller-initiated teardown. See [`Manager::close`].
    fn close(this: &Arc<Self>) {
        let (conn, was_active) = {
            let mut st = this.state.lock().expect("state lock poisoned");
            tracing::debug!("closing manager");
            st.skip_reconnect = true;
            st.reconnecting = false;
            if let Some(timer) = st.reconnect_timer.take() {
                timer.abort();
            }
            st.cleanup();
            let was_active = st.ready_state != ReadyState::Closed;
            st.ready_state = ReadyState::Closed;
            st.generation += 1;
            (st.conn.take(), was_active)
        };

        if let Some(conn) = conn {
            tokio::spawn(async move {
                let _ = conn.close().await;
            });
        }

        if was_active {
            this.emit(ManagerEvent::Close("forced close".to_string()));
        }
    }

    // -- Packet queue and encode gate ----------------------------------

    /// Accepts one packet for transmission. See [`Manager::packet`].
    fn packet(this: &Arc<Self>, packet: Packet) -> Result<(), ClientError> {
        let generation = {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.ready_state != ReadyState::Open {
                return Err(ClientError::NotOpen);
            }
            if st.encoding {
                tracing::trace!(
                    buffered = st.packet_buffer.len() + 1,
                    "encode in flight; buffering packet"
                );
                st.packet_buffer.push_back(packet);
                return Ok(());
            }
            st.encoding = true;
            st.generation
        };

        tracing::trace!(kind = %packet.kind, nsp = %packet.nsp, "writing packet");
        let task = Arc::clone(this);
        tokio::spawn(async move {
            Shared::encode_task(task, generation, packet).await;
        });
        Ok(())
    }

    /// Drains the encode pipeline: encodes one packet, writes its
    /// frames in order, then pulls the next buffered packet — all while
    /// holding the encode gate, so encodes never overlap and frames of
    /// different packets never interleave.
    async fn encode_task(this: Arc<Self>, generation: u64, first: Packet) {
        let mut current = Some(first);

        while let Some(packet) = current.take() {
            match this.encoder.encode(packet).await {
                Ok(frames) => {
                    let conn = {
                        let st =
                            this.state.lock().expect("state lock poisoned");
                        if st.generation != generation {
                            // Superseded; cleanup already cleared the
                            // gate and the buffer.
                            return;
                        }
                        st.conn.clone()
                    };
                    if let Some(conn) = conn {
                        for frame in &frames {
                            if let Err(e) = conn.send(frame).await {
                                tracing::debug!(
                                    error = %e,
                                    "write failed; dropping remaining frames"
                                );
                                // The read loop will observe the dead
                                // connection; the write failure itself
                                // still surfaces to subscribers.
                                this.emit_if_current(
                                    generation,
                                    ManagerEvent::Error(e.to_string()),
                                );
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "encode failed; packet dropped");
                    this.emit_if_current(
                        generation,
                        ManagerEvent::Error(e.to_string()),
                    );
                }
            }

            // Release the gate and, atomically, claim the next packet
            // so no interloper can slip in between.
            current = {
                let mut st = this.state.lock().expect("state lock poisoned");
                if st.generation != generation {
                    return;
                }
                match st.packet_buffer.pop_front() {
                    Some(next) => Some(next),
                    None => {
                        st.encoding = false;
                        None
                    }
                }
            };
        }
    }

    // -- Reconnection policy -------------------------------------------

    /// Starts a reconnect cycle if one is not already running and the
    /// retry budget allows it.
    fn maybe_reconnect(this: &Arc<Self>) {
        enum Plan {
            Skip,
            Failed,
            Attempt(u32, Duration),
        }

        let plan = {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.reconnecting
                || st.skip_reconnect
                || st.ready_state != ReadyState::Closed
            {
                Plan::Skip
            } else if this
                .opts
                .reconnection_attempts
                .is_some_and(|max| st.backoff.attempts() >= max)
            {
                // Terminal for this cycle. Reset so a manual open()
                // starts a fresh budget.
                st.backoff.reset();
                Plan::Failed
            } else {
                st.reconnecting = true;
                let delay = st.backoff.duration();
                let attempt = st.backoff.attempts();
                let timer = Arc::clone(this);
                st.reconnect_timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    Shared::run_reconnect(timer, attempt);
                }));
                Plan::Attempt(attempt, delay)
            }
        };

        match plan {
            Plan::Skip => {}
            Plan::Failed => {
                tracing::warn!("reconnect budget exhausted");
                this.emit(ManagerEvent::ReconnectFailed);
            }
            Plan::Attempt(attempt, delay) => {
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "reconnect scheduled"
                );
                this.emit(ManagerEvent::ReconnectAttempt(attempt));
            }
        }
    }

    /// Runs when the reconnect timer fires: re-opens, and on failure
    /// recurses into the policy.
    fn run_reconnect(this: Arc<Self>, attempt: u32) {
        {
            let mut st = this.state.lock().expect("state lock poisoned");
            if st.skip_reconnect {
                st.reconnecting = false;
                return;
            }
            st.reconnect_timer = None;
        }

        tracing::debug!(attempt, "attempting reconnect");
        let retry = Arc::clone(&this);
        let callback: OpenCallback = Box::new(move |result| {
            if result.is_err() {
                tracing::debug!(attempt, "reconnect attempt failed");
                {
                    let mut st =
                        retry.state.lock().expect("state lock poisoned");
                    st.reconnecting = false;
                }
                Shared::maybe_reconnect(&retry);
            }
            // Success is observed by on_open through `reconnecting`.
        });
        if !Shared::open(&this, Some(callback)) {
            // A manual open() superseded this retry and took the
            // connection slot. Release the reconnecting claim so that
            // attempt's failure path re-enters the policy.
            let mut st = this.state.lock().expect("state lock poisoned");
            st.reconnecting = false;
        }
    }

    // -- Namespace registry --------------------------------------------

    /// Drops the registry entry for `nsp`; closes the manager once the
    /// last namespace is gone.
    fn destroy(this: &Arc<Self>, nsp: &str) {
        let close_now = {
            let mut st = this.state.lock().expect("state lock poisoned");
            st.nsps.remove(nsp);
            st.nsps.is_empty()
        };
        if close_now {
            tracing::debug!("last namespace destroyed; closing manager");
            Shared::close(this);
        }
    }
}

// Socket reaches back into the shared internals without owning them.
impl<T: Transport, E: Encoder, D: Decoder> Shared<T, E, D> {
    pub(crate) fn submit_packet(
        this: &Arc<Self>,
        packet: Packet,
    ) -> Result<(), ClientError> {
        Shared::packet(this, packet)
    }

    pub(crate) fn destroy_nsp(this: &Arc<Self>, nsp: &str) {
        Shared::destroy(this, nsp);
    }
}

pub(crate) type SharedRef<T, E, D> = Weak<Shared<T, E, D>>;
