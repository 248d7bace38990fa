//! Shared building blocks for the `knock` workspace.
//!
//! Everything in here is pure: models, configuration, the service fingerprint table,
//! the port set selector and the logging macros used by the other crates. No sockets
//! are opened from this crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod scan;
pub mod services;

#[doc(hidden)]
pub use tracing as __tracing;
