use crate::model::{Finding, ScanType};
use crate::store::ResultStore;

/// Path keywords that mark a directory hit as worth a second pass.
pub const INTERESTING_KEYWORDS: [&str; 9] =
    ["admin", "api", "backup", "config", "login", "panel", "upload", "files", "docs"];

/// Basic heuristic: a 200 directory hit whose path mentions a sensitive keyword.
pub fn is_interesting(f: &Finding) -> bool {
    if f.scan_type != ScanType::Directory || f.status_code != 200 {
        return false;
    }
    let lower = f.url.to_lowercase();
    INTERESTING_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// URLs of interesting directory hits, in store order.
pub fn interesting_directories(store: &ResultStore) -> Vec<String> {
    store.select(is_interesting).into_iter().map(|f| f.url).collect()
}
