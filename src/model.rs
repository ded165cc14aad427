use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase a finding was discovered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Directory,
    Subdomain,
    Vhost,
    Recursive,
}

impl ScanType {
    pub const ALL: [ScanType; 4] = [
        ScanType::Directory,
        ScanType::Subdomain,
        ScanType::Vhost,
        ScanType::Recursive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Directory => "directory",
            ScanType::Subdomain => "subdomain",
            ScanType::Vhost => "vhost",
            ScanType::Recursive => "recursive",
        }
    }

    /// Prefix used for raw output files of the initial phases.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ScanType::Directory => "directories",
            ScanType::Subdomain => "subdomains",
            ScanType::Vhost => "vhosts",
            ScanType::Recursive => "recursive",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed discovery record. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub url: String,
    pub status_code: u32,
    pub size: u64,
    pub timestamp: DateTime<Local>,
    pub scan_type: ScanType,
}

impl Finding {
    pub fn new(url: impl Into<String>, status_code: u32, size: u64, scan_type: ScanType) -> Self {
        Self {
            url: url.into(),
            status_code,
            size,
            timestamp: Local::now(),
            scan_type,
        }
    }
}
