use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use knock_common::network::probe::PortProbeResult;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::scanner::Prober;

/// Full TCP handshake probe. Needs no privileges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnect;

#[async_trait]
impl Prober for TcpConnect {
    async fn probe(&self, ip: IpAddr, port: u16, probe_timeout: Duration) -> PortProbeResult {
        handshake_probe(ip, port, probe_timeout).await
    }
}

/// Attempts one connection to `ip:port` and closes it straight away.
///
/// The stream, or the pending connect future on timeout, is dropped before
/// returning, so the socket is released on every path.
pub async fn handshake_probe(ip: IpAddr, port: u16, probe_timeout: Duration) -> PortProbeResult {
    let socket_addr: SocketAddr = SocketAddr::new(ip, port);
    bounded_connect(port, probe_timeout, TcpStream::connect(socket_addr)).await
}

/// Races `connect` against `probe_timeout`. A connect that never completes is closed.
async fn bounded_connect<F>(port: u16, probe_timeout: Duration, connect: F) -> PortProbeResult
where
    F: Future<Output = io::Result<TcpStream>>,
{
    match timeout(probe_timeout, connect).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortProbeResult::open(port)
        }
        Ok(Err(err)) => classify_failure(port, err),
        Err(_elapsed) => PortProbeResult::closed(port),
    }
}

fn classify_failure(port: u16, err: io::Error) -> PortProbeResult {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::TimedOut => PortProbeResult::closed(port),
        _ => PortProbeResult::error(port, err.to_string()),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
