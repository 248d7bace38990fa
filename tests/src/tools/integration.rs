use knock_plugins::{
    CmsAudit, CmsKind, ExternalTool, Interpreter, SqlInjection, SubdomainBrute, ToolCommand,
    ToolError, ToolOutput, XssProbe, run_tool,
};

const TARGET: &str = "http://shop.example.test/goods.php?id=1";

#[test]
fn catalogue_builds_the_expected_command_lines() {
    let sqlmap: ToolCommand = SqlInjection::new("/opt/sqlmap").command(TARGET);
    assert_eq!(sqlmap.program, "python2");
    assert_eq!(
        sqlmap.args,
        vec!["sqlmap.py", "-u", TARGET, "--risk", "3", "--level", "3", "--dbs", "--batch"]
    );

    let ecshop: ToolCommand = CmsAudit::new(CmsKind::Ecshop, "/opt/cms").command(TARGET);
    assert_eq!(ecshop.program, "python");
    assert_eq!(ecshop.args, vec!["ECSHOP.py", "-u", TARGET]);

    let xss: ToolCommand = XssProbe::new("/opt/xsstrike").command(TARGET);
    assert_eq!(xss.args, vec!["xsstrike.py", "-u", TARGET]);
}

#[tokio::test]
async fn missing_interpreter_is_reported_as_spawn_error() {
    let mut tool: SubdomainBrute = SubdomainBrute::new(std::env::temp_dir());
    tool.interpreter = Interpreter("knock-no-such-python".to_string());

    let err: ToolError = run_tool(&tool, "example.test").await.unwrap_err();
    assert!(matches!(
        err,
        ToolError::Spawn { ref program, .. } if program == "knock-no-such-python"
    ));
}

/// Runs a catalogue entry end to end, with `sh` standing in for Python.
#[cfg(unix)]
#[tokio::test]
async fn catalogue_tool_runs_inside_its_install_dir() -> anyhow::Result<()> {
    let install_dir = std::env::temp_dir().join(format!("knock-tools-{}", std::process::id()));
    std::fs::create_dir_all(&install_dir)?;
    std::fs::write(
        install_dir.join("subDomainsBrute.py"),
        "echo \"brute $1\"\necho \"wordlist missing\" >&2\nexit 1\n",
    )?;

    let mut tool: SubdomainBrute = SubdomainBrute::new(&install_dir);
    tool.interpreter = Interpreter("sh".to_string());

    let output: ToolOutput = run_tool(&tool, "example.test").await?;
    std::fs::remove_dir_all(&install_dir)?;

    assert_eq!(output.stdout, "brute example.test\n");
    assert_eq!(output.stderr, "wordlist missing\n");
    assert_eq!(output.status, Some(1));
    assert!(!output.success());
    assert_eq!(output.combined(), "brute example.test\nwordlist missing\n");
    Ok(())
}
