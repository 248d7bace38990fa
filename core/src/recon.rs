//! # Recon Service
//!
//! Implements the core "resolve, select, scan" use case.
//!
//! The service owns a [`Resolver`] and a [`PortScanner`]; everything else it needs
//! (mode, stop signal) arrives with the call, so one service can run any number of
//! scans one after the other.

use std::net::IpAddr;
use std::sync::Arc;

use knock_common::config::Config;
use knock_common::error::ReconError;
use knock_common::network::ports::{PortSet, select_ports};
use knock_common::network::probe::{PortProbeResult, PortState};
use knock_common::network::target::Target;
use knock_common::scan::{ScanRun, StopSignal};
use tracing::debug;

use crate::network::tcp::TcpConnect;
use crate::resolver::{self, DnsResolver, Resolver};
use crate::scanner::{PortScanner, Sweep};

pub struct ReconService {
    resolver: Box<dyn Resolver>,
    scanner: PortScanner,
}

impl ReconService {
    pub fn new(resolver: Box<dyn Resolver>, scanner: PortScanner) -> Self {
        Self { resolver, scanner }
    }

    /// System resolver plus real TCP connect probes, sized by `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Box::new(DnsResolver),
            PortScanner::from_config(Arc::new(TcpConnect), cfg),
        )
    }

    pub fn scanner(&self) -> &PortScanner {
        &self.scanner
    }

    /// Pins the target's address. Already resolved targets are returned as is.
    pub async fn resolve(&self, target: Target) -> Result<Target, ReconError> {
        if target.is_resolved() {
            return Ok(target);
        }
        let ip: IpAddr = resolver::resolve(self.resolver.as_ref(), target.host()).await?;
        debug!("{} resolved to {ip}", target.host());
        Ok(target.resolved(ip))
    }

    /// Executes a full run against `target`.
    ///
    /// The process involves:
    /// 1. **Resolution**: nothing is probed unless this succeeds.
    /// 2. **Selection**: the port set for the target's mode.
    /// 3. **Sweep**: every selected port, bounded by the pool size.
    pub async fn scan(&self, target: Target, stop: &StopSignal) -> Result<ScanRun, ReconError> {
        let target: Target = self.resolve(target).await?;
        let Some(ip) = target.ip() else {
            return Err(ReconError::NoAddress(target.host().to_string()));
        };

        let ports: PortSet = select_ports(target.mode());
        debug!("{} mode selected {} ports", target.mode(), ports.len());

        let sweep: Sweep = self.scanner.sweep(ip, ports.iter(), stop).await;
        Ok(assemble(target, ports.len(), sweep))
    }
}

fn assemble(target: Target, requested: usize, sweep: Sweep) -> ScanRun {
    let probed: usize = sweep.results.len();

    let (mut open, mut errors): (Vec<PortProbeResult>, Vec<PortProbeResult>) = sweep
        .results
        .into_iter()
        .filter(|result| result.state != PortState::Closed)
        .partition(PortProbeResult::is_open);
    open.sort_by_key(|result| result.port);
    errors.sort_by_key(|result| result.port);

    ScanRun {
        target,
        open,
        errors,
        requested,
        probed,
        peak_in_flight: sweep.peak_in_flight,
        cancelled: sweep.cancelled,
        started_at: sweep.started_at,
        finished_at: sweep.started_at + sweep.elapsed,
        elapsed: sweep.elapsed,
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
