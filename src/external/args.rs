use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::model::ScanType;

/// Gobuster sub-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Dir,
    Dns,
    Vhost,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Dir => "dir",
            ScanMode::Dns => "dns",
            ScanMode::Vhost => "vhost",
        }
    }
}

/// One external-tool call: everything needed to run it and consume its output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanInvocation {
    pub mode: ScanMode,
    pub args: Vec<String>,
    pub output_file: Option<PathBuf>,
    pub scan_type: ScanType,
}

/// Flags shared by every mode. Fields left empty or zero emit nothing.
pub fn base_args(config: &Config) -> Vec<String> {
    let mut args = Vec::new();

    if config.threads > 0 {
        args.push("-t".to_string());
        args.push(config.threads.to_string());
    }
    if !config.delay.is_empty() {
        args.push("--delay".to_string());
        args.push(config.delay.clone());
    }
    if !config.timeout.is_empty() {
        args.push("--timeout".to_string());
        args.push(config.timeout.clone());
    }
    if config.skip_ssl {
        args.push("-k".to_string());
    }
    if config.follow_redirects {
        args.push("-r".to_string());
    }
    if !config.user_agent.is_empty() {
        args.push("-a".to_string());
        args.push(config.user_agent.clone());
    }
    if !config.proxy.is_empty() {
        args.push("--proxy".to_string());
        args.push(config.proxy.clone());
    }
    if !config.cookies.is_empty() {
        args.push("-c".to_string());
        args.push(config.cookies.clone());
    }
    for header in &config.headers {
        args.push("-H".to_string());
        args.push(header.clone());
    }
    if !config.status_codes.is_empty() {
        args.push("-s".to_string());
        args.push(config.status_codes.join(","));
    }
    if !config.exclude_codes.is_empty() {
        args.push("-b".to_string());
        args.push(config.exclude_codes.join(","));
    }

    args
}

impl ScanInvocation {
    /// `dir` scan of `url`. Extensions are appended when configured.
    pub fn directory(config: &Config, url: &str, wordlist: &str, output: &Path, scan_type: ScanType) -> Self {
        let mut args = Self::with_target(config, ScanMode::Dir, "-u", url, wordlist, output);
        if !config.extensions.is_empty() {
            args.push("-x".to_string());
            args.push(config.extensions.join(","));
        }
        Self { mode: ScanMode::Dir, args, output_file: Some(output.to_path_buf()), scan_type }
    }

    pub fn subdomain(config: &Config, domain: &str, wordlist: &str, output: &Path) -> Self {
        let args = Self::with_target(config, ScanMode::Dns, "-d", domain, wordlist, output);
        Self { mode: ScanMode::Dns, args, output_file: Some(output.to_path_buf()), scan_type: ScanType::Subdomain }
    }

    pub fn vhost(config: &Config, url: &str, wordlist: &str, output: &Path) -> Self {
        let args = Self::with_target(config, ScanMode::Vhost, "-u", url, wordlist, output);
        Self { mode: ScanMode::Vhost, args, output_file: Some(output.to_path_buf()), scan_type: ScanType::Vhost }
    }

    fn with_target(
        config: &Config,
        mode: ScanMode,
        target_flag: &str,
        target: &str,
        wordlist: &str,
        output: &Path,
    ) -> Vec<String> {
        let mut args = vec![mode.as_str().to_string()];
        args.extend(base_args(config));
        args.push(target_flag.to_string());
        args.push(target.to_string());
        args.push("-w".to_string());
        args.push(wordlist.to_string());
        args.push("-o".to_string());
        args.push(output.display().to_string());
        args
    }

    pub fn command_line(&self, program: &str) -> String {
        format!("{} {}", program, self.args.join(" "))
    }
}
