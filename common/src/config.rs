use std::time::Duration;

/// Number of connection attempts allowed in flight at once.
pub const DEFAULT_POOL_SIZE: usize = 20;

/// How long a single connection attempt may wait for the handshake.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on simultaneously in-flight probes.
    ///
    /// A value of zero is treated as one by the scanner.
    pub pool_size: usize,
    /// Hard timeout applied to every TCP connect attempt.
    pub probe_timeout: Duration,
    /// Surfaces per-port socket errors as warnings instead of dropping them.
    pub verbose: bool,
    /// Skips the startup banner.
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            verbose: false,
            no_banner: false,
        }
    }
}
