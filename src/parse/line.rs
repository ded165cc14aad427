use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Finding, ScanType};

// Example: /admin (Status: 200) [Size: 1234]
// Trailing text after the size (e.g. `[--> http://...]` on redirects) is ignored.
static RESULT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+\(Status:\s*(\d+)\)\s+\[Size:\s*(\d+)").expect("result line pattern")
});

/// Parse one line of the tool's result file.
///
/// Returns `None` for blank lines, `=` separator lines and anything not shaped
/// like `<path> (Status: <int>) [Size: <int>]`. A numeral that does not fit its
/// integer type becomes zero instead of dropping the line, so a garbled value
/// never costs the rest of the record.
pub fn parse_line(line: &str, scan_type: ScanType) -> Option<Finding> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('=') {
        return None;
    }
    if !line.contains("(Status:") {
        return None;
    }

    let caps = RESULT_LINE.captures(line)?;
    let url = caps.get(1)?.as_str().trim();
    if url.is_empty() {
        return None;
    }
    let status_code = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()).unwrap_or(0);
    let size = caps.get(3).and_then(|m| m.as_str().parse::<u64>().ok()).unwrap_or(0);

    Some(Finding::new(url, status_code, size, scan_type))
}
