//! # Reporter
//!
//! Renders a finished [`ScanRun`] as line-oriented text: one `port<TAB>service`
//! line per open port followed by the total elapsed time. Closed ports produce
//! nothing; socket errors become warnings that the caller may choose to show.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use knock_common::scan::ScanRun;
use knock_common::services::ServiceFingerprints;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPort {
    pub port: u16,
    pub service: &'static str,
}

impl fmt::Display for OpenPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.port, self.service)
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub host: String,
    pub ip: Option<IpAddr>,
    pub open: Vec<OpenPort>,
    /// One entry per port whose probe hit a socket error.
    pub warnings: Vec<String>,
    /// Set when the run was stopped before every port was probed.
    pub interrupted: Option<String>,
    pub elapsed: Duration,
}

impl Report {
    pub fn elapsed_hms(&self) -> String {
        format_hms(self.elapsed)
    }

    pub fn elapsed_line(&self) -> String {
        format!("Total time {}", self.elapsed_hms())
    }
}

/// Port lines, then the elapsed-time line. Warnings are not part of the text.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for open_port in &self.open {
            writeln!(f, "{open_port}")?;
        }
        writeln!(f, "{}", self.elapsed_line())
    }
}

pub fn render(run: &ScanRun, fingerprints: &ServiceFingerprints) -> Report {
    let open: Vec<OpenPort> = run
        .open
        .iter()
        .map(|result| OpenPort {
            port: result.port,
            service: fingerprints.describe(result.port),
        })
        .collect();

    let warnings: Vec<String> = run
        .errors
        .iter()
        .filter_map(|result| {
            result
                .detail()
                .map(|reason| format!("port {}: {reason}", result.port))
        })
        .collect();

    let interrupted: Option<String> = run.cancelled.then(|| {
        format!(
            "scan interrupted, {} of {} ports probed",
            run.probed, run.requested
        )
    });

    Report {
        host: run.target.host().to_string(),
        ip: run.ip(),
        open,
        warnings,
        interrupted,
        elapsed: run.elapsed,
    }
}

/// `HH:MM:SS`, hours are not wrapped at 24.
pub fn format_hms(elapsed: Duration) -> String {
    let secs: u64 = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
