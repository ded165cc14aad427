use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Placeholder target shipped in the generated template.
pub const PLACEHOLDER_TARGET: &str = "http://example.com";

/// Run configuration. Read-only once a run starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub target: String,
    pub wordlists: Vec<String>,
    pub extensions: Vec<String>,
    pub threads: u32,
    pub delay: String,
    pub timeout: String,
    pub output_dir: String,
    pub skip_ssl: bool,
    pub follow_redirects: bool,
    pub user_agent: String,
    pub proxy: String,
    pub cookies: String,
    pub headers: Vec<String>,
    pub status_codes: Vec<String>,
    pub exclude_codes: Vec<String>,
}

/// Command-line values layered over a loaded config. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<String>,
    pub output_dir: Option<String>,
    pub threads: Option<u32>,
}

impl Config {
    /// Built-in template used when no config file is given and by `--gen-config`.
    pub fn default_template() -> Self {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            target: PLACEHOLDER_TARGET.to_string(),
            wordlists: strings(&[
                "/usr/share/wordlists/dirb/common.txt",
                "/usr/share/wordlists/SecLists/Discovery/Web-Content/directory-list-2.3-medium.txt",
            ]),
            extensions: strings(&["php", "html", "txt", "js", "asp", "aspx"]),
            threads: 30,
            delay: "100ms".to_string(),
            timeout: "10s".to_string(),
            output_dir: "./gobuster_results".to_string(),
            skip_ssl: true,
            follow_redirects: true,
            user_agent: "Mozilla/5.0 (compatible; UltimateGobuster/1.0)".to_string(),
            proxy: String::new(),
            cookies: String::new(),
            headers: Vec::new(),
            status_codes: strings(&["200", "301", "302", "401", "403"]),
            exclude_codes: strings(&["404", "500"]),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Load from `path` when given, otherwise start from the template.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default_template()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(target) = overrides.target.filter(|t| !t.trim().is_empty()) {
            self.target = target;
        }
        if let Some(out) = overrides.output_dir.filter(|o| !o.trim().is_empty()) {
            self.output_dir = out;
        }
        if let Some(threads) = overrides.threads.filter(|t| *t > 0) {
            self.threads = threads;
        }
    }

    /// Pre-flight check; failures here abort the run before any scan starts.
    pub fn validate(&self) -> Result<()> {
        let target = self.target.trim();
        if target.is_empty() || target == PLACEHOLDER_TARGET {
            bail!("Please provide a target URL using --target or a config file");
        }
        if self.wordlists.iter().all(|w| w.trim().is_empty()) {
            bail!("At least one wordlist is required");
        }
        Ok(())
    }

    pub fn output_root(&self) -> PathBuf {
        if self.output_dir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.output_dir)
        }
    }
}
