//! # Knock Engine
//!
//! Resolve a target, sweep a port set with a bounded pool of TCP connect probes,
//! and classify what answered.
//!
//! * **[`resolver`]**: host name to a single address.
//! * **[`network`]**: the connect probe itself.
//! * **[`scanner`]**: the bounded fan-out over a port set.
//! * **[`recon`]**: the resolve → select → scan pipeline.
//! * **[`report`]**: turns a finished run into text.

pub mod network;
pub mod recon;
pub mod report;
pub mod resolver;
pub mod scanner;
