use std::process::ExitCode;
use std::sync::Arc;

use colored::{ColoredString, Colorize};
use knock_common::config::Config;
use knock_common::network::ports::select_ports;
use knock_common::network::target::{ScanMode, Target};
use knock_common::scan::{ScanRun, StopSignal};
use knock_common::services::ServiceFingerprints;
use knock_common::{error, info, success, warn};
use knock_core::network::tcp::TcpConnect;
use knock_core::recon::ReconService;
use knock_core::report::{self, Report};
use knock_core::resolver::DnsResolver;
use knock_core::scanner::PortScanner;
use tokio::task::JoinHandle;
use tracing::{Instrument, Span};

use crate::terminal::{print, spinner};

/// Exit status when the host cannot be turned into an address.
const RESOLUTION_EXIT: u8 = 1;
/// Exit status after Ctrl-C, following the shell's 128 + SIGINT convention.
const INTERRUPTED_EXIT: u8 = 130;

pub async fn scan(url: &str, mode: ScanMode, cfg: &Config) -> anyhow::Result<ExitCode> {
    let target: Target = match Target::new(url, mode) {
        Ok(target) => target,
        Err(err) => {
            error!("{err}");
            return Ok(ExitCode::from(RESOLUTION_EXIT));
        }
    };

    let port_count: usize = select_ports(mode).len();
    let span: Span = spinner::scan_span(port_count);
    let scanner: PortScanner = PortScanner::from_config(Arc::new(TcpConnect), cfg)
        .with_progress(spinner::scan_progress(span.clone()));
    let service: ReconService = ReconService::new(Box::new(DnsResolver), scanner);

    info!("Resolving server IP for {}", target.host());
    let target: Target = match service.resolve(target).await {
        Ok(target) => target,
        Err(err) => {
            error!("Failed to resolve server IP: {err}");
            return Ok(ExitCode::from(RESOLUTION_EXIT));
        }
    };
    if let Some(ip) = target.ip() {
        success!("Server IP is {}", print::ip(ip));
    }

    info!(
        "Starting port scan: {} ports ({} mode, {} at a time)",
        print::count(port_count),
        mode,
        service.scanner().pool_size()
    );
    if print::is_decorated() {
        info!("Press Ctrl-C to stop early");
    }

    let stop: StopSignal = StopSignal::new();
    let interrupt: JoinHandle<()> = watch_interrupt(stop.clone());

    let run: ScanRun = service.scan(target, &stop).instrument(span).await?;
    interrupt.abort();

    let report: Report = report::render(&run, &ServiceFingerprints::builtin());
    scan_ends(&report, cfg);

    if report.interrupted.is_some() {
        return Ok(ExitCode::from(INTERRUPTED_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}

fn watch_interrupt(stop: StopSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, letting in-flight probes finish");
            stop.trigger();
        }
    })
}

fn scan_ends(report: &Report, cfg: &Config) {
    print::header("scan results");

    for open_port in &report.open {
        print::open_port(open_port);
    }

    if report.open.is_empty() {
        print::no_results();
        info!("No open ports found on {}", report.host);
    }

    if cfg.verbose {
        for warning in &report.warnings {
            warn!("{warning}");
        }
    }
    if let Some(interrupted) = &report.interrupted {
        warn!("{interrupted}");
    }

    info!("{}", report.elapsed_line());

    print::fat_separator();
    print::centerln(&summary(report));
    print::fat_separator();
}

fn summary(report: &Report) -> String {
    let open: usize = report.open.len();
    let noun: &str = if open == 1 { "port" } else { "ports" };
    let scanned: ColoredString = match report.ip {
        Some(ip) => print::ip(ip),
        None => report.host.as_str().normal(),
    };
    format!(
        "{} open {noun} on {scanned} in {}",
        print::count(open),
        report.elapsed_hms()
    )
}
