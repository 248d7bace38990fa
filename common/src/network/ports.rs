//! # Port Set Selector
//!
//! Turns a [`ScanMode`] into the ordered list of ports a scan will knock on.

use std::ops::RangeInclusive;

use crate::network::target::ScanMode;

/// Well-known ports with a history of exposed services or known vulnerabilities.
///
/// Sorted ascending and free of duplicates.
pub const FAST_PORTS: [u16; 55] = [
    21, 22, 23, 80, 111, 161, 389, 443, 445, 512, 513, 514, 873, 1025, 1433, 1521, 2082, 2083,
    2222, 2601, 2604, 3128, 3306, 3311, 3312, 3389, 4440, 5432, 5672, 5900, 5984, 6082, 6379,
    7001, 7002, 7008, 7778, 8080, 8083, 8089, 8649, 8808, 8888, 9090, 9200, 9300, 10000, 11211,
    15672, 27017, 27018, 28017, 50000, 50030, 50070,
];

pub const FULL_RANGE: RangeInclusive<u16> = 1..=u16::MAX;

/// Ordered, restartable set of ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSet {
    Curated(&'static [u16]),
    Range(RangeInclusive<u16>),
}

impl PortSet {
    pub fn len(&self) -> usize {
        match self {
            PortSet::Curated(ports) => ports.len(),
            PortSet::Range(range) => range.clone().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the ports in ascending order. Every call starts from the beginning.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        let (curated, range) = match self {
            PortSet::Curated(ports) => (Some(ports.iter().copied()), None),
            PortSet::Range(range) => (None, Some(range.clone())),
        };
        curated.into_iter().flatten().chain(range.into_iter().flatten())
    }
}

pub fn select_ports(mode: ScanMode) -> PortSet {
    match mode {
        ScanMode::Fast => PortSet::Curated(&FAST_PORTS),
        ScanMode::Full => PortSet::Range(FULL_RANGE),
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
