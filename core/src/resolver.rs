//! # Resolver
//!
//! Turns the host part of a target into the single address the sweep is aimed at.

use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use knock_common::error::ReconError;

/// Name lookup strategy.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Every address `host` maps to. An empty list is not an error here.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ReconError>;
}

/// System resolver (`getaddrinfo` on tokio's blocking pool).
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsResolver;

#[async_trait]
impl Resolver for DnsResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ReconError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|source| ReconError::Resolution {
                host: host.to_string(),
                source,
            })?;

        Ok(addrs.map(|addr: SocketAddr| addr.ip()).collect())
    }
}

/// Resolves `host` through `resolver`, one attempt, no retries.
pub async fn resolve(resolver: &dyn Resolver, host: &str) -> Result<IpAddr, ReconError> {
    let addrs: Vec<IpAddr> = resolver.lookup(host).await?;
    pick_address(&addrs).ok_or_else(|| ReconError::NoAddress(host.to_string()))
}

/// First IPv4 address if there is one, otherwise the first address.
pub fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
