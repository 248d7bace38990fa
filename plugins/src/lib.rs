//! # External Tool Collaborators
//!
//! The wider toolkit around the port scanner drives third-party programs (a
//! sub-domain brute forcer, a site fingerprinting script, an SQL-injection
//! framework, CMS and XSS checkers). None of their logic lives here: each tool is
//! described as a structured command line and executed as a child process whose
//! output is captured for display.

mod catalog;
mod process;

pub use catalog::{
    CmsAudit, CmsKind, Interpreter, SiteFingerprint, SqlInjection, SubdomainBrute, XssProbe,
};
pub use process::{ToolCommand, ToolError, ToolOutput, run_command, run_tool};

/// Something that can be pointed at a target URL.
pub trait ExternalTool: Send + Sync {
    /// Short human readable name, used in logs.
    fn name(&self) -> &str;

    /// The command line that runs this tool against `target`.
    fn command(&self, target: &str) -> ToolCommand;
}
