use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Result, ScanError};
use crate::external::args::ScanInvocation;
use crate::parse::parse_file;
use crate::store::ResultStore;

/// Runs one invocation of the external tool to completion.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, invocation: &ScanInvocation) -> Result<()>;
}

/// Spawns the real tool with inherited stdio so its progress stays visible.
#[derive(Debug, Clone)]
pub struct GobusterExecutor {
    program: String,
}

impl GobusterExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// True when the program can be resolved (on `PATH` or as a direct path).
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}

impl Default for GobusterExecutor {
    fn default() -> Self {
        Self::new("gobuster")
    }
}

#[async_trait]
impl ToolExecutor for GobusterExecutor {
    async fn execute(&self, invocation: &ScanInvocation) -> Result<()> {
        tracing::info!("Running: {}", invocation.command_line(&self.program));

        let status = Command::new(&self.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ScanError::Spawn { program: self.program.clone(), source })?;

        if !status.success() {
            return Err(ScanError::ExitStatus { program: self.program.clone(), status });
        }
        Ok(())
    }
}

/// What one invocation left behind: findings appended to the store, and the
/// failure if the scan did not finish cleanly. Both can be set at once.
#[derive(Debug)]
pub struct InvocationOutcome {
    pub findings: usize,
    pub error: Option<ScanError>,
}

impl InvocationOutcome {
    pub fn into_result(self) -> Result<usize> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.findings),
        }
    }
}

/// Execute one invocation and append whatever its output file holds.
///
/// The output file is parsed after a non-zero exit as well; only a failed
/// spawn skips it.
pub async fn run_invocation(
    executor: &dyn ToolExecutor,
    invocation: &ScanInvocation,
    store: &ResultStore,
) -> InvocationOutcome {
    let error = match executor.execute(invocation).await {
        Err(e @ ScanError::Spawn { .. }) => return InvocationOutcome { findings: 0, error: Some(e) },
        other => other.err(),
    };

    let mut outcome = InvocationOutcome { findings: 0, error };
    if let Some(path) = &invocation.output_file {
        match parse_file(path, invocation.scan_type).await {
            Ok(findings) => outcome.findings = store.extend(findings),
            Err(e) if outcome.error.is_some() => {
                tracing::debug!(error = %e, "no partial results after failed scan");
            }
            Err(e) => outcome.error = Some(e),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::args::ScanMode;
    use crate::model::ScanType;
    use std::path::PathBuf;

    struct Canned {
        body: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl ToolExecutor for Canned {
        async fn execute(&self, invocation: &ScanInvocation) -> Result<()> {
            if let Some(path) = &invocation.output_file {
                std::fs::write(path, self.body).unwrap();
            }
            if self.fail {
                return Err(ScanError::Spawn {
                    program: "fake".into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
            Ok(())
        }
    }

    fn invocation(path: PathBuf) -> ScanInvocation {
        ScanInvocation { mode: ScanMode::Dir, args: vec![], output_file: Some(path), scan_type: ScanType::Directory }
    }

    #[tokio::test]
    async fn parses_output_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new();
        let exec = Canned { body: "/admin (Status: 200) [Size: 512]\n", fail: false };
        let n = run_invocation(&exec, &invocation(dir.path().join("o.txt")), &store)
            .await
            .into_result()
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.snapshot()[0].url, "/admin");
    }

    #[tokio::test]
    async fn spawn_failure_skips_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new();
        let exec = Canned { body: "/admin (Status: 200) [Size: 512]\n", fail: true };
        let err = run_invocation(&exec, &invocation(dir.path().join("o.txt")), &store)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ScanError::Spawn { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let exec = GobusterExecutor::new("definitely-not-a-real-gobuster-binary");
        assert!(!exec.is_available());
        let store = ResultStore::new();
        let inv = ScanInvocation { mode: ScanMode::Dir, args: vec![], output_file: None, scan_type: ScanType::Directory };
        let err = run_invocation(&exec, &inv, &store).await.into_result().unwrap_err();
        assert!(matches!(err, ScanError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_still_parses_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-gobuster.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\nout=\"\"\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-o\" ]; then out=\"$2\"; fi\n  shift\ndone\necho '/partial (Status: 200) [Size: 7]' > \"$out\"\nexit 3\n",
        )
        .unwrap();

        let out = dir.path().join("directories_1.txt");
        let inv = ScanInvocation {
            mode: ScanMode::Dir,
            args: vec![script.display().to_string(), "dir".into(), "-o".into(), out.display().to_string()],
            output_file: Some(out),
            scan_type: ScanType::Directory,
        };
        let exec = GobusterExecutor::new("sh");
        let store = ResultStore::new();
        let outcome = run_invocation(&exec, &inv, &store).await;

        assert!(matches!(outcome.error, Some(ScanError::ExitStatus { .. })));
        assert_eq!(outcome.findings, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].url, "/partial");
    }
}
