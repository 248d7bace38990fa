//! # Scan Target Model
//!
//! Defines what a scan is pointed at and how wide it goes.
//!
//! A target is whatever the user typed after `-u`. That can be:
//! * A bare hostname (`example.com`).
//! * A literal address (`10.0.0.5`, `::1`, `[fe80::1]`).
//! * A URL (`https://example.com:8443/login?next=/`), of which only the host is kept.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::ReconError;

/// How many ports a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanMode {
    /// The curated list of well-known service ports.
    Fast,
    /// Every TCP port from 1 through 65535.
    Full,
}

impl FromStr for ScanMode {
    type Err = String;

    /// Accepts the short flags (`p`, `f`) and their long names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "partial" | "fast" => Ok(ScanMode::Fast),
            "f" | "full" => Ok(ScanMode::Full),
            _ => Err(format!("invalid scan type '{s}', expected 'p' or 'f'")),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Fast => write!(f, "fast"),
            ScanMode::Full => write!(f, "full"),
        }
    }
}

/// One scan request.
///
/// The address starts out empty and is pinned exactly once through [`Target::resolved`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    raw: String,
    host: String,
    ip: Option<IpAddr>,
    mode: ScanMode,
}

impl Target {
    pub fn new(raw: &str, mode: ScanMode) -> Result<Self, ReconError> {
        let host: String =
            extract_host(raw).ok_or_else(|| ReconError::InvalidTarget(raw.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            host,
            ip: None,
            mode,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn is_resolved(&self) -> bool {
        self.ip.is_some()
    }

    /// Consumes the target and returns it with its address pinned.
    pub fn resolved(self, ip: IpAddr) -> Self {
        Self {
            ip: Some(ip),
            ..self
        }
    }
}

/// Reduces a user supplied URL or hostname to the bare host.
///
/// Strips the scheme, user-info, path, query, fragment, IPv6 brackets and a
/// numeric port. A non-numeric `:suffix` is left in place, so the lookup fails
/// later instead of silently scanning a different host.
pub fn extract_host(raw: &str) -> Option<String> {
    let trimmed: &str = raw.trim();

    let without_scheme: &str = match trimmed.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => trimmed,
    };

    let authority: &str = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    let authority: &str = authority
        .rsplit_once('@')
        .map_or(authority, |(_user_info, host)| host);

    let host: &str = strip_port(authority);
    if host.is_empty() {
        return None;
    }

    Some(host.to_string())
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_port(authority: &str) -> &str {
    if let Some(rest) = authority.strip_prefix('[') {
        return rest.split_once(']').map_or(rest, |(host, _port)| host);
    }

    // bare IPv6 literals are full of colons
    if authority.parse::<IpAddr>().is_ok() {
        return authority;
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if port.parse::<u16>().is_ok() => host,
        _ => authority,
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
