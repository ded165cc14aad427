use parking_lot::Mutex;

use crate::model::Finding;

/// Append-only, lock-guarded collection of findings shared by every phase.
///
/// All reads and writes take the same exclusive lock; the backing vector is
/// never handed out.
#[derive(Debug, Default)]
pub struct ResultStore {
    findings: Mutex<Vec<Finding>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, finding: Finding) {
        self.findings.lock().push(finding);
    }

    /// Append a batch under one lock acquisition so a file's findings stay contiguous.
    pub fn extend(&self, batch: impl IntoIterator<Item = Finding>) -> usize {
        let mut guard = self.findings.lock();
        let before = guard.len();
        guard.extend(batch);
        guard.len() - before
    }

    pub fn snapshot(&self) -> Vec<Finding> {
        self.findings.lock().clone()
    }

    pub fn select<P>(&self, predicate: P) -> Vec<Finding>
    where
        P: Fn(&Finding) -> bool,
    {
        self.findings.lock().iter().filter(|f| predicate(f)).cloned().collect()
    }

    /// Run `f` over the findings while holding the lock.
    pub fn with_findings<R>(&self, f: impl FnOnce(&[Finding]) -> R) -> R {
        let guard = self.findings.lock();
        f(&guard)
    }

    pub fn len(&self) -> usize {
        self.findings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScanType;
    use std::sync::Arc;

    #[test]
    fn select_filters_in_append_order() {
        let store = ResultStore::new();
        store.append(Finding::new("/a", 200, 1, ScanType::Directory));
        store.append(Finding::new("/b", 404, 1, ScanType::Directory));
        store.append(Finding::new("/c", 200, 1, ScanType::Vhost));

        let ok: Vec<_> = store.select(|f| f.status_code == 200).into_iter().map(|f| f.url).collect();
        assert_eq!(ok, ["/a", "/c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        let store = Arc::new(ResultStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..250 {
                        store.append(Finding::new(format!("/{t}/{i}"), 200, i, ScanType::Directory));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let all = store.snapshot();
        assert_eq!(all.len(), 2000);
        let mut urls: Vec<_> = all.into_iter().map(|f| f.url).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 2000);
    }

    #[test]
    fn extend_reports_added_count() {
        let store = ResultStore::new();
        let added = store.extend(vec![
            Finding::new("x.example.com", 200, 0, ScanType::Subdomain),
            Finding::new("y.example.com", 200, 0, ScanType::Subdomain),
        ]);
        assert_eq!(added, 2);
        assert!(!store.is_empty());
    }
}
