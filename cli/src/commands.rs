pub mod scan;

use std::time::Duration;

use clap::Parser;
use clap::error::ErrorKind;
use knock_common::config::{Config, DEFAULT_POOL_SIZE, DEFAULT_PROBE_TIMEOUT};
use knock_common::network::target::ScanMode;

pub const USAGE: &str = "usage: knock -u <url> -t <p|f>";

/// Exit status for a malformed command line.
pub const USAGE_EXIT: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "knock", version)]
#[command(about = "Concurrent TCP port and service reconnaissance.")]
pub struct CommandLine {
    /// Target hostname or URL; only the host part is used
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: String,

    /// Scan type: 'p' for well-known ports, 'f' for all 65535
    #[arg(short = 't', long = "types", value_name = "p|f")]
    pub types: ScanMode,

    /// Maximum number of connection attempts in flight
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_POOL_SIZE as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub pool_size: u16,

    /// Per-port connect timeout in milliseconds
    #[arg(
        long,
        value_name = "MS",
        default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Show debug output and per-port socket errors
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the startup banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    /// Parses `std::env::args`. Anything malformed prints a single usage line to
    /// stderr and exits with status 2; `--help` and `--version` behave as usual.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(commands) => commands,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => {
                    eprintln!("{USAGE}");
                    std::process::exit(USAGE_EXIT)
                }
            },
        }
    }

    pub fn to_config(&self) -> Config {
        Config {
            pool_size: usize::from(self.pool_size),
            probe_timeout: Duration::from_millis(self.timeout),
            verbose: self.verbose,
            no_banner: self.no_banner,
        }
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
