use std::io;

use thiserror::Error;

/// Failures that stop a scan before the first probe is sent.
#[derive(Error, Debug)]
pub enum ReconError {
    #[error("invalid target: '{0}'")]
    InvalidTarget(String),
    #[error("failed to resolve {host}: {source}")]
    Resolution {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("{0} did not resolve to any address")]
    NoAddress(String),
}
