use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use knock_common::config::Config;
use knock_common::error::ReconError;
use knock_common::network::probe::{PortProbeResult, PortState};
use knock_common::network::target::{ScanMode, Target};
use knock_common::scan::{ScanRun, StopSignal};
use knock_common::services::ServiceFingerprints;
use knock_core::network::tcp::TcpConnect;
use knock_core::recon::ReconService;
use knock_core::report::{self, Report};
use knock_core::resolver::DnsResolver;
use knock_core::scanner::{PortScanner, Sweep};
use tokio::net::TcpListener;

use crate::fakes::{ScriptedProber, StaticResolver};

const INTRANET: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));
const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

fn service_with(prober: Arc<ScriptedProber>, pool_size: usize) -> ReconService {
    ReconService::new(
        Box::new(StaticResolver(vec![INTRANET])),
        PortScanner::new(prober, pool_size, Duration::from_millis(500)),
    )
}

/// Fast mode against a host where only SSH answers.
#[tokio::test]
async fn only_ssh_open_yields_a_single_port_line() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> = Arc::new(ScriptedProber::with_open([22]));
    let service: ReconService = service_with(Arc::clone(&prober), 20);

    let target: Target = Target::new("http://intranet.test/index.php?id=1", ScanMode::Fast)?;
    let run: ScanRun = service.scan(target, &StopSignal::new()).await?;
    let report: Report = report::render(&run, &ServiceFingerprints::builtin());

    assert_eq!(run.ip(), Some(INTRANET));
    assert_eq!(run.requested, 55);
    assert_eq!(run.probed, 55);
    assert_eq!(prober.calls(), 55);
    assert!(run.is_complete());

    let text: String = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "22\tSSH");
    assert!(lines[1].starts_with("Total time "));
    Ok(())
}

/// A port suffix that is not a number makes the lookup fail before any probe.
#[tokio::test]
async fn unresolvable_host_probes_nothing() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> = Arc::new(ScriptedProber::default());
    let service: ReconService = ReconService::new(
        Box::new(DnsResolver),
        PortScanner::new(Arc::clone(&prober) as _, 20, Duration::from_millis(500)),
    );

    let target: Target = Target::new("http://example.test:not-a-real-host", ScanMode::Fast)?;
    let result: Result<ScanRun, ReconError> = service.scan(target, &StopSignal::new()).await;

    assert!(matches!(
        result,
        Err(ReconError::Resolution { .. }) | Err(ReconError::NoAddress(_))
    ));
    assert_eq!(prober.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_lookup_is_a_resolution_failure() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> = Arc::new(ScriptedProber::default());
    let service: ReconService = ReconService::new(
        Box::new(StaticResolver(Vec::new())),
        PortScanner::new(Arc::clone(&prober) as _, 20, Duration::from_millis(500)),
    );

    let target: Target = Target::new("ghost.test", ScanMode::Full)?;
    let result: Result<ScanRun, ReconError> = service.scan(target, &StopSignal::new()).await;

    assert!(matches!(result, Err(ReconError::NoAddress(host)) if host == "ghost.test"));
    assert_eq!(prober.calls(), 0);
    Ok(())
}

/// Full mode against a host where nothing answers.
#[tokio::test]
async fn unreachable_host_full_sweep_reports_only_elapsed_time() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> = Arc::new(ScriptedProber::default());
    let service: ReconService = service_with(Arc::clone(&prober), 256);

    let target: Target = Target::new("intranet.test", ScanMode::Full)?;
    let run: ScanRun = service.scan(target, &StopSignal::new()).await?;
    let report: Report = report::render(&run, &ServiceFingerprints::builtin());

    assert_eq!(run.requested, 65535);
    assert_eq!(run.probed, 65535);
    assert_eq!(prober.calls(), 65535);
    assert!(run.open.is_empty());
    assert!(run.errors.is_empty());

    let text: String = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Total time "));
    Ok(())
}

#[tokio::test]
async fn pool_size_bounds_in_flight_probes() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> =
        Arc::new(ScriptedProber::with_open([80, 443]).delayed(Duration::from_millis(5)));
    let cfg: Config = Config {
        pool_size: 8,
        ..Config::default()
    };
    let service: ReconService = ReconService::new(
        Box::new(StaticResolver(vec![INTRANET])),
        PortScanner::from_config(Arc::clone(&prober) as _, &cfg),
    );

    let target: Target = Target::new("intranet.test", ScanMode::Fast)?;
    let run: ScanRun = service.scan(target, &StopSignal::new()).await?;

    assert!(prober.max_running() <= 8);
    assert!(run.peak_in_flight <= 8);
    assert_eq!(run.open_ports().collect::<Vec<u16>>(), vec![80, 443]);
    Ok(())
}

#[tokio::test]
async fn rescanning_the_same_target_gives_the_same_ports() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> = Arc::new(ScriptedProber::with_open([21, 3306, 6379]));
    let service: ReconService = service_with(prober, 20);

    let target: Target = Target::new("intranet.test", ScanMode::Fast)?;
    let first: ScanRun = service.scan(target.clone(), &StopSignal::new()).await?;
    let second: ScanRun = service.scan(target, &StopSignal::new()).await?;

    assert_eq!(first.open, second.open);
    assert_eq!(
        first.open_ports().collect::<Vec<u16>>(),
        vec![21, 3306, 6379]
    );
    Ok(())
}

#[tokio::test]
async fn stop_signal_yields_a_partial_interrupted_report() -> anyhow::Result<()> {
    let prober: Arc<ScriptedProber> =
        Arc::new(ScriptedProber::default().delayed(Duration::from_millis(1)));
    let stop: StopSignal = StopSignal::new();
    let seen: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

    let trigger: StopSignal = stop.clone();
    let counter: Arc<AtomicUsize> = Arc::clone(&seen);
    let scanner: PortScanner = PortScanner::new(prober, 4, Duration::from_millis(500))
        .with_progress(Arc::new(move |_: &PortProbeResult| {
            if counter.fetch_add(1, Ordering::SeqCst) + 1 == 100 {
                trigger.trigger();
            }
        }));
    let service: ReconService =
        ReconService::new(Box::new(StaticResolver(vec![INTRANET])), scanner);

    let target: Target = Target::new("intranet.test", ScanMode::Full)?;
    let run: ScanRun = service.scan(target, &stop).await?;
    let report: Report = report::render(&run, &ServiceFingerprints::builtin());

    assert!(run.cancelled);
    assert!(!run.is_complete());
    assert!(run.probed >= 100);
    assert!(run.probed < run.requested);
    assert_eq!(seen.load(Ordering::SeqCst), run.probed);
    assert!(report.interrupted.is_some());
    Ok(())
}

/// Real connect probes against listeners on the loopback interface.
#[tokio::test]
async fn loopback_listener_is_found_by_a_real_sweep() -> anyhow::Result<()> {
    let listener: TcpListener = TcpListener::bind((LOCALHOST, 0)).await?;
    let open_port: u16 = listener.local_addr()?.port();

    let closed_port: u16 = {
        let dropped: TcpListener = TcpListener::bind((LOCALHOST, 0)).await?;
        dropped.local_addr()?.port()
    };

    let scanner: PortScanner =
        PortScanner::new(Arc::new(TcpConnect), 2, Duration::from_millis(500));
    let sweep: Sweep = scanner
        .sweep(LOCALHOST, [open_port, closed_port], &StopSignal::new())
        .await;

    assert_eq!(sweep.results.len(), 2);
    for result in &sweep.results {
        if result.port == open_port {
            assert_eq!(result.state, PortState::Open);
        } else {
            assert_eq!(result.port, closed_port);
            assert!(!result.is_open());
        }
    }
    drop(listener);
    Ok(())
}
