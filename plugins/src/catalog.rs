//! The tools the reconnaissance toolkit knows how to launch.
//!
//! Every entry is an interpreter, a script inside an install directory, and the
//! argument layout the script expects. Install locations are supplied by the
//! caller; nothing is assumed about where the scripts live.

use std::path::{Path, PathBuf};

use crate::{ExternalTool, ToolCommand};

/// The Python binary a script is run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter(pub String);

impl Interpreter {
    pub fn python2() -> Self {
        Self("python2".to_string())
    }

    pub fn python3() -> Self {
        Self("python".to_string())
    }
}

fn script(interpreter: &Interpreter, install_dir: &Path, file: &str) -> ToolCommand {
    ToolCommand::new(interpreter.0.clone())
        .arg(file)
        .current_dir(install_dir)
}

/// Sub-domain brute forcer: `subDomainsBrute.py <domain>`.
#[derive(Debug, Clone)]
pub struct SubdomainBrute {
    pub interpreter: Interpreter,
    pub install_dir: PathBuf,
}

impl SubdomainBrute {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Interpreter::python2(),
            install_dir: install_dir.into(),
        }
    }
}

impl ExternalTool for SubdomainBrute {
    fn name(&self) -> &str {
        "subdomain brute force"
    }

    fn command(&self, target: &str) -> ToolCommand {
        script(&self.interpreter, &self.install_dir, "subDomainsBrute.py").arg(target)
    }
}

/// Website fingerprinting: `WebEye.py -u <url>`.
#[derive(Debug, Clone)]
pub struct SiteFingerprint {
    pub interpreter: Interpreter,
    pub install_dir: PathBuf,
}

impl SiteFingerprint {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Interpreter::python2(),
            install_dir: install_dir.into(),
        }
    }
}

impl ExternalTool for SiteFingerprint {
    fn name(&self) -> &str {
        "site fingerprint"
    }

    fn command(&self, target: &str) -> ToolCommand {
        script(&self.interpreter, &self.install_dir, "WebEye.py").args(["-u", target])
    }
}

/// SQL-injection framework run non-interactively with aggressive risk and level,
/// enumerating databases.
#[derive(Debug, Clone)]
pub struct SqlInjection {
    pub interpreter: Interpreter,
    pub install_dir: PathBuf,
    pub risk: u8,
    pub level: u8,
}

impl SqlInjection {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Interpreter::python2(),
            install_dir: install_dir.into(),
            risk: 3,
            level: 3,
        }
    }
}

impl ExternalTool for SqlInjection {
    fn name(&self) -> &str {
        "sql injection"
    }

    fn command(&self, target: &str) -> ToolCommand {
        script(&self.interpreter, &self.install_dir, "sqlmap.py").args([
            "-u".to_string(),
            target.to_string(),
            "--risk".to_string(),
            self.risk.to_string(),
            "--level".to_string(),
            self.level.to_string(),
            "--dbs".to_string(),
            "--batch".to_string(),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsKind {
    Ecshop,
    Aspcms,
}

impl CmsKind {
    fn script(self) -> &'static str {
        match self {
            CmsKind::Ecshop => "ECSHOP.py",
            CmsKind::Aspcms => "ASPCMS.py",
        }
    }
}

/// Known-vulnerability checks for a specific CMS.
#[derive(Debug, Clone)]
pub struct CmsAudit {
    pub kind: CmsKind,
    pub interpreter: Interpreter,
    pub install_dir: PathBuf,
}

impl CmsAudit {
    pub fn new(kind: CmsKind, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            interpreter: Interpreter::python3(),
            install_dir: install_dir.into(),
        }
    }
}

impl ExternalTool for CmsAudit {
    fn name(&self) -> &str {
        match self.kind {
            CmsKind::Ecshop => "ecshop audit",
            CmsKind::Aspcms => "aspcms audit",
        }
    }

    fn command(&self, target: &str) -> ToolCommand {
        script(&self.interpreter, &self.install_dir, self.kind.script()).args(["-u", target])
    }
}

/// Reflected XSS scanner: `xsstrike.py -u <url>`.
#[derive(Debug, Clone)]
pub struct XssProbe {
    pub interpreter: Interpreter,
    pub install_dir: PathBuf,
}

impl XssProbe {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Interpreter::python3(),
            install_dir: install_dir.into(),
        }
    }
}

impl ExternalTool for XssProbe {
    fn name(&self) -> &str {
        "xss probe"
    }

    fn command(&self, target: &str) -> ToolCommand {
        script(&self.interpreter, &self.install_dir, "xsstrike.py").args(["-u", target])
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

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://shop.example.test/";

    #[test]
    fn subdomain_brute_takes_the_target_positionally() {
        let command: ToolCommand = SubdomainBrute::new("/opt/subdomains").command("example.test");
        assert_eq!(command.program, "python2");
        assert_eq!(command.args, vec!["subDomainsBrute.py", "example.test"]);
        assert_eq!(command.working_dir, Some(PathBuf::from("/opt/subdomains")));
    }

    #[test]
    fn site_fingerprint_uses_url_flag() {
        let command: ToolCommand = SiteFingerprint::new("/opt/webeye").command(URL);
        assert_eq!(command.args, vec!["WebEye.py", "-u", URL]);
    }

    #[test]
    fn sql_injection_runs_unattended() {
        let command: ToolCommand = SqlInjection::new("/opt/sqlmap").command(URL);
        assert_eq!(
            command.args,
            vec!["sqlmap.py", "-u", URL, "--risk", "3", "--level", "3", "--dbs", "--batch"]
        );
    }

    #[test]
    fn cms_audit_picks_the_script_for_its_kind() {
        let ecshop: ToolCommand = CmsAudit::new(CmsKind::Ecshop, "/opt/cms").command(URL);
        let aspcms: ToolCommand = CmsAudit::new(CmsKind::Aspcms, "/opt/cms").command(URL);

        assert_eq!(ecshop.program, "python");
        assert_eq!(ecshop.args, vec!["ECSHOP.py", "-u", URL]);
        assert_eq!(aspcms.args, vec!["ASPCMS.py", "-u", URL]);
    }

    #[test]
    fn interpreter_can_be_swapped() {
        let mut probe: XssProbe = XssProbe::new("/opt/xsstrike");
        probe.interpreter = Interpreter("python3.11".to_string());

        let command: ToolCommand = probe.command(URL);
        assert_eq!(command.program, "python3.11");
        assert_eq!(command.args, vec!["xsstrike.py", "-u", URL]);
        assert_eq!(probe.name(), "xss probe");
    }
}
