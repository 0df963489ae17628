//! Shared test infrastructure for integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Temporary working directory with a config file pointing every flowmaker
/// path inside it.
pub struct TestFixture {
    pub temp_dir: TempDir,
}

/// Captured result of one flowmaker invocation.
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestFixture {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("reports"))?;
        std::fs::create_dir_all(root.join("inbox"))?;
        let config = serde_json::json!({
            "schema_version": 1,
            "catalog_path": root.join("flows.csv"),
            "report_dir": root.join("reports"),
            "import_dir": root.join("inbox"),
        });
        std::fs::write(
            root.join("config.json"),
            serde_json::to_string_pretty(&config)?,
        )?;
        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root().join("flows.csv")
    }

    /// Write `contents` to `rel` under the fixture root.
    pub fn write_file(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(path, contents).expect("write fixture file");
    }

    pub fn read_file(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root().join(rel)).expect("read fixture file")
    }

    /// Run flowmaker with `args`, feeding `stdin` as operator input.
    pub fn run(&self, args: &[&str], stdin: &str) -> anyhow::Result<RunOutput> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_flowmaker"))
            .arg("--config")
            .arg(self.root().join("config.json"))
            .args(args)
            .current_dir(self.root())
            .env_remove("FLOWMAKER_CATALOG")
            .env_remove("FLOWMAKER_CONFIG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        if let Some(mut input) = child.stdin.take() {
            input.write_all(stdin.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        Ok(RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
