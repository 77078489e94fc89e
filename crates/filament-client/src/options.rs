//! Manager configuration.

use std::time::Duration;

use filament_transport::ConnectOptions;

/// Configuration for a [`Manager`](crate::Manager).
///
/// Immutable after construction. Override fields with struct-update
/// syntax:
///
/// ```rust
/// use filament_client::ManagerOptions;
///
/// let opts = ManagerOptions {
///     reconnection_attempts: Some(5),
///     ..ManagerOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    /// Endpoint path appended to the URI. Default: `/socket.io`.
    pub path: String,

    /// Extra query string passed to the transport.
    pub query: Option<String>,

    /// Whether to reconnect automatically after an error or an
    /// unexpected close.
    pub reconnection: bool,

    /// Retry budget per reconnection cycle. `None` means unbounded.
    pub reconnection_attempts: Option<u32>,

    /// Initial delay before the first reconnect attempt.
    pub reconnection_delay: Duration,

    /// Upper bound on the reconnect delay.
    pub reconnection_delay_max: Duration,

    /// Backoff jitter (0.0 = none, 1.0 = up to ±100% of the delay).
    pub randomization_factor: f64,

    /// Connect timeout. `None` disables the timer and lets a connect
    /// attempt run as long as the transport allows.
    pub timeout: Option<Duration>,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            path: "/socket.io".to_string(),
            query: None,
            reconnection: true,
            reconnection_attempts: None,
            reconnection_delay: Duration::from_secs(1),
            reconnection_delay_max: Duration::from_secs(5),
            randomization_factor: 0.5,
            timeout: Some(Duration::from_secs(20)),
        }
    }
}

impl ManagerOptions {
    /// The transport-level slice of these options.
    pub(crate) fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            path: self.path.clone(),
            query: self.query.clone(),
        }
    }
}
