//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Start a mock control plane that answers every connection with a
/// fixed raw HTTP response. Returns the address it is listening on.
pub async fn start_mock_control_plane(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a control plane that accepts connections but never responds,
/// to exercise the gateway timeouts.
#[allow(dead_code)]
pub async fn start_unresponsive_control_plane() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A canned 200 response carrying Caddy's Server header, like the admin
/// API answers `GET /config/`.
#[allow(dead_code)]
pub const CADDY_OK: &str =
    "HTTP/1.1 200 OK\r\nServer: Caddy\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}";

/// A canned 500 response.
#[allow(dead_code)]
pub const CADDY_ERROR: &str =
    "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
