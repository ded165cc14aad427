use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::external::{GobusterExecutor, ToolExecutor};
use crate::filter::interesting_directories;
use crate::model::ScanType;
use crate::output::report::{write_reports, ReportOutcome};
use crate::phases::{PhaseContext, PhaseReport};
use crate::store::ResultStore;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    /// Initial phases in directory, subdomain, vhost order, then the recursive phase.
    pub phases: Vec<PhaseReport>,
    pub total_findings: usize,
    pub report: ReportOutcome,
}

impl RunSummary {
    pub fn phase(&self, phase: ScanType) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

/// Owns the config, the shared store and the run directory for one scan.
pub struct Orchestrator {
    ctx: PhaseContext,
}

impl Orchestrator {
    /// Creates `<output_dir>/gobuster_scan_<timestamp>` and prepares the run.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_executor(config, Arc::new(GobusterExecutor::default()))
    }

    pub fn with_executor(config: Config, executor: Arc<dyn ToolExecutor>) -> Result<Self> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let output_dir = config.output_root().join(format!("gobuster_scan_{}", stamp));
        std::fs::create_dir_all(&output_dir)
            .map_err(|source| ScanError::OutputDir { path: output_dir.clone(), source })?;

        Ok(Self {
            ctx: PhaseContext {
                config: Arc::new(config),
                store: Arc::new(ResultStore::new()),
                output_dir,
                executor,
            },
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.ctx.output_dir
    }

    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    pub fn store(&self) -> &ResultStore {
        &self.ctx.store
    }

    /// Directory, subdomain and vhost phases run as separate tasks; the
    /// recursive phase starts only after all three have finished.
    pub async fn run(&self) -> RunSummary {
        tracing::info!(url = %self.ctx.config.target, output = %self.ctx.output_dir.display(), "Starting scan");

        let mut phases = self.run_initial_phases().await;

        let interesting = interesting_directories(&self.ctx.store);
        phases.push(self.ctx.run_recursive_phase(interesting).await);

        tracing::info!("Generating comprehensive report...");
        let report = write_reports(&self.ctx.output_dir, &self.ctx.config.target, &self.ctx.store);
        if report.is_ok() {
            tracing::info!(dir = %self.ctx.output_dir.display(), "Reports generated");
        }

        RunSummary {
            output_dir: self.ctx.output_dir.clone(),
            phases,
            total_findings: self.ctx.store.len(),
            report,
        }
    }

    async fn run_initial_phases(&self) -> Vec<PhaseReport> {
        const INITIAL: [ScanType; 3] = [ScanType::Directory, ScanType::Subdomain, ScanType::Vhost];

        let mut tasks = JoinSet::new();
        for phase in INITIAL {
            let ctx = self.ctx.clone();
            tasks.spawn(async move {
                match phase {
                    ScanType::Directory => ctx.run_directory_phase().await,
                    ScanType::Subdomain => ctx.run_subdomain_phase().await,
                    _ => ctx.run_vhost_phase().await,
                }
            });
        }

        let mut reports = Vec::with_capacity(INITIAL.len());
        let mut lost = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::error!(error = %e, "phase task panicked");
                    lost.push(e.to_string());
                }
            }
        }

        // JoinError does not say which phase it was; pair leftovers with the missing phases.
        let missing: Vec<ScanType> =
            INITIAL.into_iter().filter(|p| !reports.iter().any(|r| r.phase == *p)).collect();
        for (phase, cause) in missing.into_iter().zip(lost) {
            reports.push(PhaseReport::aborted(phase, ScanError::PhaseTask(phase, cause)));
        }

        reports.sort_by_key(|r| r.phase);
        reports
    }
}
