//! Logging macros shared by every crate in the workspace.
//!
//! They forward to [`tracing`] with a fixed set of targets so the CLI formatter can
//! pick the right prefix. Library code never installs a subscriber.

/// Target for ordinary status lines.
pub const LOG_TARGET: &str = "knock";
/// Target for lines that must be written verbatim (no prefix, no level marker).
pub const PRINT_TARGET: &str = "knock::print";
/// Target for positive status lines.
pub const SUCCESS_TARGET: &str = "knock::success";

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__tracing::info!(target: $crate::logging::LOG_TARGET, $($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::__tracing::info!(target: $crate::logging::SUCCESS_TARGET, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__tracing::warn!(target: $crate::logging::LOG_TARGET, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__tracing::error!(target: $crate::logging::LOG_TARGET, $($arg)+)
    };
}
