use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::ScanError;
use crate::external::{run_invocation, ScanInvocation, ToolExecutor};
use crate::model::ScanType;
use crate::store::ResultStore;
use crate::target::{extract_domain, join_target, sanitize_path};

/// Everything a phase needs; cheap to clone into a spawned task.
#[derive(Clone)]
pub struct PhaseContext {
    pub config: Arc<Config>,
    pub store: Arc<ResultStore>,
    pub output_dir: PathBuf,
    pub executor: Arc<dyn ToolExecutor>,
}

#[derive(Debug)]
pub struct PhaseFailure {
    /// Wordlist, or discovered path for the recursive phase.
    pub item: String,
    pub error: ScanError,
    /// Partial results the failed scan still wrote.
    pub findings: usize,
}

/// Outcome of one phase. Failures are collected, never propagated.
#[derive(Debug)]
pub struct PhaseReport {
    pub phase: ScanType,
    pub completed: Vec<String>,
    pub failures: Vec<PhaseFailure>,
    /// Set when the phase could not start at all.
    pub aborted: Option<ScanError>,
    pub findings: usize,
}

impl PhaseReport {
    fn new(phase: ScanType) -> Self {
        Self { phase, completed: Vec::new(), failures: Vec::new(), aborted: None, findings: 0 }
    }

    pub fn aborted(phase: ScanType, error: ScanError) -> Self {
        Self { aborted: Some(error), ..Self::new(phase) }
    }

    pub fn is_clean(&self) -> bool {
        self.aborted.is_none() && self.failures.is_empty()
    }
}

impl PhaseContext {
    fn output_file(&self, phase: ScanType, index: usize) -> PathBuf {
        self.output_dir.join(format!("{}_{}.txt", phase.file_prefix(), index + 1))
    }

    /// Run invocations one at a time, continuing past failures.
    async fn run_sequential(&self, phase: ScanType, items: Vec<(String, ScanInvocation)>) -> PhaseReport {
        let mut report = PhaseReport::new(phase);
        for (item, invocation) in items {
            let outcome = run_invocation(self.executor.as_ref(), &invocation, &self.store).await;
            let findings = outcome.findings;
            report.findings += findings;
            match outcome.error {
                None => {
                    tracing::info!(%phase, item = %item, findings, "enumeration completed");
                    report.completed.push(item);
                }
                Some(error) => {
                    tracing::error!(%phase, item = %item, findings, error = %error, "enumeration failed");
                    report.failures.push(PhaseFailure { item, error, findings });
                }
            }
        }
        report
    }

    pub async fn run_directory_phase(&self) -> PhaseReport {
        tracing::info!("Starting directory enumeration...");
        let items = self
            .config
            .wordlists
            .iter()
            .enumerate()
            .map(|(i, wordlist)| {
                let out = self.output_file(ScanType::Directory, i);
                let inv = ScanInvocation::directory(&self.config, &self.config.target, wordlist, &out, ScanType::Directory);
                (wordlist.clone(), inv)
            })
            .collect();
        self.run_sequential(ScanType::Directory, items).await
    }

    pub async fn run_subdomain_phase(&self) -> PhaseReport {
        tracing::info!("Starting subdomain enumeration...");
        let domain = match extract_domain(&self.config.target) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "subdomain enumeration skipped");
                return PhaseReport::aborted(ScanType::Subdomain, e);
            }
        };
        let items = self
            .config
            .wordlists
            .iter()
            .enumerate()
            .map(|(i, wordlist)| {
                let out = self.output_file(ScanType::Subdomain, i);
                (wordlist.clone(), ScanInvocation::subdomain(&self.config, &domain, wordlist, &out))
            })
            .collect();
        self.run_sequential(ScanType::Subdomain, items).await
    }

    pub async fn run_vhost_phase(&self) -> PhaseReport {
        tracing::info!("Starting virtual host enumeration...");
        let items = self
            .config
            .wordlists
            .iter()
            .enumerate()
            .map(|(i, wordlist)| {
                let out = self.output_file(ScanType::Vhost, i);
                (wordlist.clone(), ScanInvocation::vhost(&self.config, &self.config.target, wordlist, &out))
            })
            .collect();
        self.run_sequential(ScanType::Vhost, items).await
    }

    /// One extra `dir` scan per selected path with the first wordlist.
    /// Results of these scans are not fed back in; depth is fixed at one.
    /// Output files carry the selection index so similar paths never share one.
    pub async fn run_recursive_phase(&self, paths: Vec<String>) -> PhaseReport {
        tracing::info!(targets = paths.len(), "Starting recursive enumeration on interesting directories...");
        let Some(wordlist) = self.config.wordlists.first() else {
            return PhaseReport::aborted(ScanType::Recursive, ScanError::NoWordlist);
        };

        let items = paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| {
                let url = join_target(&self.config.target, &path);
                let out = self.output_dir.join(format!("recursive_{}_{}.txt", i + 1, sanitize_path(&path)));
                let inv = ScanInvocation::directory(&self.config, &url, wordlist, &out, ScanType::Recursive);
                (path, inv)
            })
            .collect();
        self.run_sequential(ScanType::Recursive, items).await
    }
}
