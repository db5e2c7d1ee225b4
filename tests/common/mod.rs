//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use author_gate::config::GatewayConfig;
use author_gate::{HttpServer, Overrides, Shutdown};

/// The home URL used by test configs.
#[allow(dead_code)]
pub const HOME_URL: &str = "http://site.test/";

/// Start a mock origin returning a fixed 200 response.
///
/// `extra_headers` must be empty or complete header lines ending in CRLF.
pub async fn start_mock_origin(extra_headers: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
                            body.len(),
                            extra_headers,
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Gateway config pointed at the given origin.
pub fn gateway_config(origin: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.address = origin.to_string();
    config.gate.home_url = HOME_URL.to_string();
    config
}

/// Spawn a gateway on an ephemeral port with the built-in policy.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    spawn_gateway_with_overrides(config, Overrides::new()).await
}

/// Spawn a gateway on an ephemeral port with override hooks installed.
#[allow(dead_code)]
pub async fn spawn_gateway_with_overrides(
    mut config: GatewayConfig,
    overrides: Overrides,
) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = HttpServer::with_overrides(config, overrides);
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// HTTP client that never follows redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
