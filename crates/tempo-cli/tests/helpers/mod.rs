use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tempo").expect("Failed to find tempo binary");

        cmd.env("TEMPO_DATABASE_PATH", &self.db_path);
        // Run inside the temp dir so a tempo.toml in the repo cannot leak in.
        cmd.current_dir(self.temp_dir.path());

        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Helper to run a command and return its stdout as a string
    pub fn run_and_read(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run command");
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

/// Pulls the first 8-character hex token out of command output. Works on
/// table and status output alike as long as titles avoid hex-looking words.
pub fn extract_short_id(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .find(|tok| tok.len() == 8 && tok.chars().all(|c| c.is_ascii_hexdigit()))
        .expect("no short id in output")
        .to_string()
}
