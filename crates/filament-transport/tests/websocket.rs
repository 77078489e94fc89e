//! Integration tests for the WebSocket client transport.
//!
//! Each test spins up a minimal tokio-tungstenite server on a loopback
//! port and dials it through [`WebSocketTransport`] to verify that frames
//! actually flow over the network in both directions.

#[cfg(feature = "websocket")]
mod websocket {
    use filament_transport::{
        ConnectOptions, Connection, Frame, Transport, WebSocketTransport,
    };
    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    type ServerWs =
        tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

    /// Binds a one-shot server and returns its address plus a task that
    /// resolves to the accepted server-side stream.
    async fn start_server() -> (String, tokio::task::JoinHandle<ServerWs>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have addr").to_string();

        let handle = tokio::spawn(async move {
            let (stream, _) =
                listener.accept().await.expect("should accept");
            tokio_tungstenite::accept_async(stream)
                .await
                .expect("should upgrade")
        });

        (addr, handle)
    }

    #[tokio::test]
    async fn test_websocket_connect_send_receive() {
        let (addr, server) = start_server().await;

        let transport = WebSocketTransport;
        let conn = transport
            .connect(&format!("ws://{addr}"), &ConnectOptions::default())
            .await
            .expect("should connect");

        let mut server_ws = server.await.expect("server task");

        // --- Client sends, server receives ---
        conn.send(&Frame::Text("hello".into()))
            .await
            .expect("send should succeed");

        let msg = server_ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_text().unwrap().as_str(), "hello");

        // --- Server sends, client receives ---
        server_ws
            .send(Message::Binary(vec![1u8, 2, 3].into()))
            .await
            .unwrap();

        let frame = conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(frame, Frame::Binary(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_server_close() {
        let (addr, server) = start_server().await;

        let transport = WebSocketTransport;
        let conn = transport
            .connect(&format!("ws://{addr}"), &ConnectOptions::default())
            .await
            .expect("should connect");

        let mut server_ws = server.await.expect("server task");
        server_ws.send(Message::Close(None)).await.unwrap();

        let result = conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on server close");
    }

    #[tokio::test]
    async fn test_websocket_connect_refused_returns_error() {
        let transport = WebSocketTransport;
        // Port 1 on loopback is essentially never listening.
        let result = transport
            .connect("ws://127.0.0.1:1", &ConnectOptions::default())
            .await;
        assert!(result.is_err(), "dialing a dead port should fail");
    }
}
