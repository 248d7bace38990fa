use std::fmt;

/// Outcome of a single connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortState {
    /// The handshake completed.
    Open,
    /// Refused, reset, or no answer before the timeout.
    Closed,
    /// Any other socket failure, scoped to this port only.
    Error { reason: String },
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => write!(f, "open"),
            PortState::Closed => write!(f, "closed"),
            PortState::Error { .. } => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortProbeResult {
    pub port: u16,
    pub state: PortState,
}

impl PortProbeResult {
    pub fn open(port: u16) -> Self {
        Self {
            port,
            state: PortState::Open,
        }
    }

    pub fn closed(port: u16) -> Self {
        Self {
            port,
            state: PortState::Closed,
        }
    }

    pub fn error(port: u16, reason: impl Into<String>) -> Self {
        Self {
            port,
            state: PortState::Error {
                reason: reason.into(),
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, PortState::Error { .. })
    }

    /// Socket error text, present only for [`PortState::Error`].
    pub fn detail(&self) -> Option<&str> {
        match &self.state {
            PortState::Error { reason } => Some(reason),
            _ => None,
        }
    }
}
