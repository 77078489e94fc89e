//! Minimal echo client: connects, joins the `/echo` namespace, sends a
//! numbered message every two seconds, and logs whatever comes back.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p echo-client -- http://127.0.0.1:3000
//! ```

use std::time::Duration;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use filament_client::{Manager, ManagerEventKind, ManagerOptions};
use filament_parser::{JsonDecoder, JsonEncoder};
use filament_transport::WebSocketTransport;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let uri = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string());

    let manager = Manager::new(
        WebSocketTransport,
        JsonEncoder,
        JsonDecoder::new(),
        uri.clone(),
        ManagerOptions {
            reconnection_attempts: Some(5),
            ..ManagerOptions::default()
        },
    );

    let echo = manager.socket("/echo");
    echo.on_packet(|packet| {
        tracing::info!(data = %packet.data, "echo reply");
    });

    let join = echo.clone();
    manager.on(ManagerEventKind::Open, move |_| {
        tracing::info!("connected");
        if let Err(e) = join.connect() {
            tracing::warn!(error = %e, "failed to join /echo");
        }
    });
    manager.on(ManagerEventKind::Close, |event| {
        tracing::warn!(?event, "disconnected");
    });
    manager.on(ManagerEventKind::ReconnectFailed, |_| {
        tracing::error!("gave up reconnecting");
        std::process::exit(1);
    });

    tracing::info!(%uri, "starting echo client");
    manager.open();

    let mut seq = 0u64;
    loop {
        tokio::time::sleep(Duration::from_secs(2)).await;
        seq += 1;
        if let Err(e) = echo.emit_event("echo", json!({ "seq": seq })) {
            tracing::debug!(error = %e, "not connected; message skipped");
        }
    }
}
