use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::Cli;
use gobuster_orchestrator::external::GobusterExecutor;
use gobuster_orchestrator::{Config, Orchestrator, Overrides, RunSummary};

const DEFAULT_CONFIG_FILE: &str = "config.json";

fn print_ascii_logo() {
    println!(r#"
              ___  ___  ___ _   _ ___ _____ ___ ___
             / __|/ _ \| _ ) | | / __|_   _| __| _ \
            | (_ | (_) | _ \ |_| \__ \ | | | _||   /
             \___|\___/|___/\___/|___/ |_| |___|_|_\
                       ORCHESTRATOR v0.1.0
    "#);
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(format!("gobuster_orchestrator={crate_level}"))
            .unwrap_or_else(|_| EnvFilter::new(crate_level))
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    if cli.gen_config {
        let path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        return write_default_config(&path);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(Overrides {
        target: cli.target.clone(),
        output_dir: cli.output.clone(),
        threads: cli.threads,
    });
    config.validate()?;

    let executor = GobusterExecutor::new(cli.gobuster.clone());
    if !executor.is_available() {
        tracing::warn!(program = %executor.program(), "gobuster executable not found; scans will fail");
    }

    let orchestrator = Orchestrator::with_executor(config, Arc::new(executor))
        .context("Failed to prepare output directory")?;

    print_ascii_logo();
    println!("[>] Target: {}", orchestrator.config().target);
    println!("[>] Wordlists: {}", orchestrator.config().wordlists.len());
    println!("[>] Output: {}", orchestrator.output_dir().display());
    println!("\n{}\n", "-".repeat(60));

    let summary = orchestrator.run().await;
    print_run_summary(&summary);

    if let Err(e) = &summary.report.report {
        anyhow::bail!("Report generation failed: {e}");
    }
    if let Err(e) = &summary.report.summary {
        anyhow::bail!("Report generation failed: {e}");
    }
    Ok(())
}

fn write_default_config(path: &Path) -> anyhow::Result<()> {
    Config::default_template()
        .save_to_file(path)
        .context("Failed to create config file")?;
    println!("[+] Default configuration created: {}", path.display());
    Ok(())
}

fn print_run_summary(summary: &RunSummary) {
    println!("\n{}", "-".repeat(60));
    for phase in &summary.phases {
        if let Some(e) = &phase.aborted {
            println!("[!] {} enumeration skipped: {}", phase.phase, e);
            continue;
        }
        println!(
            "[*] {} enumeration: {} ok, {} failed, {} findings",
            phase.phase,
            phase.completed.len(),
            phase.failures.len(),
            phase.findings
        );
        for failure in &phase.failures {
            if failure.findings > 0 {
                println!(
                    "    [!] {}: {} ({} partial findings kept)",
                    failure.item, failure.error, failure.findings
                );
            } else {
                println!("    [!] {}: {}", failure.item, failure.error);
            }
        }
    }
    println!("\n[+] Total findings: {}", summary.total_findings);
    if summary.report.is_ok() {
        println!("[+] Reports generated in: {}", summary.output_dir.display());
    }
}
