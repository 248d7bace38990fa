//! The central **abstraction** for port sweeps.
//!
//! A [`Prober`] knows how to knock on a single port. The [`PortScanner`] fans a
//! prober out over a whole port set while keeping at most `pool_size` probes in
//! flight, and joins every one of them before handing the results back.
//!
//! **Architectural Note:**
//! The scanner only depends on the [`Prober`] trait, never on a concrete socket
//! implementation. The real connect probe lives in [`crate::network::tcp`]; tests
//! plug in instrumented fakes.

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant, SystemTime};

use async_trait::async_trait;
use knock_common::config::Config;
use knock_common::network::probe::{PortProbeResult, PortState};
use knock_common::scan::StopSignal;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, trace};

/// Defines the strategy for probing a single transport-layer port.
///
/// Implementations are called concurrently from many tasks and must not share
/// mutable state between calls. Failures are reported through the returned
/// [`PortProbeResult`], never by panicking.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, ip: IpAddr, port: u16, timeout: Duration) -> PortProbeResult;
}

/// Invoked once per finished probe, on the dispatching task.
pub type ProgressCallback = Arc<dyn Fn(&PortProbeResult) + Send + Sync>;

/// Raw outcome of [`PortScanner::sweep`].
#[derive(Debug, Clone)]
pub struct Sweep {
    /// One entry per dispatched port, in completion order.
    pub results: Vec<PortProbeResult>,
    pub dispatched: usize,
    pub peak_in_flight: usize,
    /// True when the stop signal cut dispatching short.
    pub cancelled: bool,
    pub started_at: SystemTime,
    /// From the first dispatch to the last completion.
    pub elapsed: Duration,
}

pub struct PortScanner {
    prober: Arc<dyn Prober>,
    pool_size: usize,
    probe_timeout: Duration,
    on_probe_done: Option<ProgressCallback>,
}

impl PortScanner {
    pub fn new(prober: Arc<dyn Prober>, pool_size: usize, probe_timeout: Duration) -> Self {
        Self {
            prober,
            pool_size: pool_size.max(1),
            probe_timeout,
            on_probe_done: None,
        }
    }

    pub fn from_config(prober: Arc<dyn Prober>, cfg: &Config) -> Self {
        Self::new(prober, cfg.pool_size, cfg.probe_timeout)
    }

    pub fn with_progress(mut self, on_probe_done: ProgressCallback) -> Self {
        self.on_probe_done = Some(on_probe_done);
        self
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Probes every port of `ports` on `ip`.
    ///
    /// Ports are dispatched in iteration order. Dispatching waits for a free pool
    /// slot, so no more than `pool_size` probes ever run at once. Completion order
    /// is whatever the network makes it. Unless `stop` fires, the returned sweep
    /// holds exactly one result per port.
    pub async fn sweep<I>(&self, ip: IpAddr, ports: I, stop: &StopSignal) -> Sweep
    where
        I: IntoIterator<Item = u16>,
    {
        let permits: Arc<Semaphore> = Arc::new(Semaphore::new(self.pool_size));
        let gauge: Arc<InFlightGauge> = Arc::new(InFlightGauge::default());
        let mut tasks: JoinSet<PortProbeResult> = JoinSet::new();
        let mut results: Vec<PortProbeResult> = Vec::new();
        let mut dispatched: usize = 0;
        let mut cancelled: bool = false;

        let started_at: SystemTime = SystemTime::now();
        let start_time: Instant = Instant::now();

        for port in ports {
            if stop.is_triggered() {
                cancelled = true;
                break;
            }

            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                error!("probe pool closed unexpectedly, {dispatched} ports dispatched");
                break;
            };

            // the pool may have been saturated for a while
            if stop.is_triggered() {
                cancelled = true;
                break;
            }

            while let Some(joined) = tasks.try_join_next() {
                self.collect(joined, &mut results);
            }

            let prober: Arc<dyn Prober> = Arc::clone(&self.prober);
            let gauge: Arc<InFlightGauge> = Arc::clone(&gauge);
            let probe_timeout: Duration = self.probe_timeout;

            tasks.spawn(async move {
                let _permit = permit;
                let _slot: GaugeSlot = gauge.enter();
                prober.probe(ip, port, probe_timeout).await
            });
            dispatched += 1;
        }

        while let Some(joined) = tasks.join_next().await {
            self.collect(joined, &mut results);
        }

        let elapsed: Duration = start_time.elapsed();
        debug!(
            "sweep of {ip} finished: {} results, peak {} in flight, {:.2}s",
            results.len(),
            gauge.peak(),
            elapsed.as_secs_f64()
        );

        Sweep {
            results,
            dispatched,
            peak_in_flight: gauge.peak(),
            cancelled,
            started_at,
            elapsed,
        }
    }

    fn collect(
        &self,
        joined: Result<PortProbeResult, JoinError>,
        results: &mut Vec<PortProbeResult>,
    ) {
        match joined {
            Ok(result) => {
                match &result.state {
                    PortState::Error { reason } => debug!("port {}: {reason}", result.port),
                    state => trace!("port {}: {state}", result.port),
                }
                if let Some(on_probe_done) = &self.on_probe_done {
                    on_probe_done(&result);
                }
                results.push(result);
            }
            Err(err) => error!("probe task failed: {err}"),
        }
    }
}

/// Counts probes currently running and remembers the high-water mark.
#[derive(Debug, Default)]
struct InFlightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightGauge {
    fn enter(self: &Arc<Self>) -> GaugeSlot {
        let now: usize = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        GaugeSlot {
            gauge: Arc::clone(self),
        }
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

struct GaugeSlot {
    gauge: Arc<InFlightGauge>,
}

impl Drop for GaugeSlot {
    fn drop(&mut self) {
        self.gauge.current.fetch_sub(1, Ordering::SeqCst);
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
