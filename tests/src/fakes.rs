use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use knock_common::error::ReconError;
use knock_common::network::probe::PortProbeResult;
use knock_core::resolver::Resolver;
use knock_core::scanner::Prober;

/// Resolves every host to the same fixed address list.
pub struct StaticResolver(pub Vec<IpAddr>);

#[async_trait]
impl Resolver for StaticResolver {
    async fn lookup(&self, _host: &str) -> Result<Vec<IpAddr>, ReconError> {
        Ok(self.0.clone())
    }
}

/// Answers from a fixed set of open ports and counts what it was asked.
#[derive(Default)]
pub struct ScriptedProber {
    pub open: HashSet<u16>,
    pub delay: Duration,
    pub calls: AtomicUsize,
    running: AtomicUsize,
    max_running: AtomicUsize,
}

impl ScriptedProber {
    pub fn with_open(open: impl IntoIterator<Item = u16>) -> Self {
        Self {
            open: open.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_running(&self) -> usize {
        self.max_running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, _ip: IpAddr, port: u16, _timeout: Duration) -> PortProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now: usize = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        if self.open.contains(&port) {
            PortProbeResult::open(port)
        } else {
            PortProbeResult::closed(port)
        }
    }
}
