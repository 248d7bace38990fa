//! # Scan Run Model
//!
//! The aggregate handed from the scanner to the reporter once a run is over,
//! plus the flag used to stop a run early.

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use crate::network::probe::PortProbeResult;
use crate::network::target::Target;

/// Run-level cancellation flag.
///
/// Once triggered the scanner stops dispatching new probes; probes already in
/// flight are left to finish on their own timeout.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct ScanRun {
    /// The target, with its address already resolved.
    pub target: Target,
    /// Open ports in ascending port order.
    pub open: Vec<PortProbeResult>,
    /// Ports whose probe failed with a socket error, ascending.
    pub errors: Vec<PortProbeResult>,
    /// Size of the selected port set.
    pub requested: usize,
    /// Number of probes that produced an outcome.
    pub probed: usize,
    pub peak_in_flight: usize,
    pub cancelled: bool,
    pub started_at: SystemTime,
    pub finished_at: SystemTime,
    pub elapsed: Duration,
}

impl ScanRun {
    /// Address the sweep was aimed at.
    pub fn ip(&self) -> Option<IpAddr> {
        self.target.ip()
    }

    /// True when every requested port has an outcome.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.probed == self.requested
    }

    pub fn open_ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.open.iter().map(|result| result.port)
    }
}
