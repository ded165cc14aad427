use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Result, ScanError};
use crate::model::{Finding, ScanType};
use crate::store::ResultStore;

pub const REPORT_FILE: &str = "report.json";
pub const SUMMARY_FILE: &str = "summary.txt";

/// Where each report landed, or why it did not.
#[derive(Debug)]
pub struct ReportOutcome {
    pub report: Result<PathBuf>,
    pub summary: Result<PathBuf>,
}

impl ReportOutcome {
    pub fn is_ok(&self) -> bool {
        self.report.is_ok() && self.summary.is_ok()
    }
}

/// Pretty JSON array of every finding, in store order.
pub fn render_export(findings: &[Finding]) -> Result<String> {
    Ok(serde_json::to_string_pretty(findings)?)
}

/// Human-readable summary grouped by scan type.
///
/// Sections follow the fixed phase order (directory, subdomain, vhost,
/// recursive) and are omitted when a phase produced nothing.
pub fn render_summary(target: &str, generated: DateTime<Local>, findings: &[Finding]) -> String {
    let mut out = String::new();
    out.push_str("=== ULTIMATE GOBUSTER SCAN SUMMARY ===\n\n");
    out.push_str(&format!("Target: {}\n", target));
    out.push_str(&format!("Scan Date: {}\n", generated.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("Total Results: {}\n\n", findings.len()));

    for scan_type in ScanType::ALL {
        let group: Vec<&Finding> = findings.iter().filter(|f| f.scan_type == scan_type).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "=== {} RESULTS ({}) ===\n",
            scan_type.as_str().to_uppercase(),
            group.len()
        ));
        for f in group {
            out.push_str(&format!("  {} (Status: {}, Size: {})\n", f.url, f.status_code, f.size));
        }
        out.push('\n');
    }

    out
}

/// Render both documents from one locked view of the store and write them to `dir`.
///
/// A failure writing one document does not stop the other.
pub fn write_reports(dir: &Path, target: &str, store: &ResultStore) -> ReportOutcome {
    let (export, summary) = store.with_findings(|findings| {
        (render_export(findings), render_summary(target, Local::now(), findings))
    });

    let report = export.and_then(|json| write_file(&dir.join(REPORT_FILE), json.as_bytes()));
    if let Err(e) = &report {
        tracing::error!(error = %e, "failed to write JSON report");
    }

    let summary = write_file(&dir.join(SUMMARY_FILE), summary.as_bytes());
    if let Err(e) = &summary {
        tracing::error!(error = %e, "failed to write summary report");
    }

    ReportOutcome { report, summary }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::write(path, bytes)
        .map_err(|source| ScanError::ReportWrite { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}
