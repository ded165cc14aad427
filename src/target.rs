use crate::error::{Result, ScanError};

/// Derive a bare domain from a target URL: scheme, path and port are stripped.
pub fn extract_domain(target: &str) -> Result<String> {
    let rest = target.trim();
    let rest = rest.strip_prefix("http://").unwrap_or(rest);
    let rest = rest.strip_prefix("https://").unwrap_or(rest);

    let host = rest.split('/').next().unwrap_or_default();
    let domain = host.split(':').next().unwrap_or_default();

    if domain.is_empty() {
        return Err(ScanError::DomainExtraction(target.to_string()));
    }
    Ok(domain.to_string())
}

/// Target for a follow-up scan under a discovered path.
pub fn join_target(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// File-name-safe form of a discovered path.
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_domain() {
        assert_eq!(extract_domain("https://example.com:8443/path").unwrap(), "example.com");
        assert_eq!(extract_domain("http://sub.example.com/").unwrap(), "sub.example.com");
        assert_eq!(extract_domain("example.com").unwrap(), "example.com");
        assert_eq!(extract_domain("example.com:80").unwrap(), "example.com");
    }

    #[test]
    fn no_host_segment_fails() {
        for t in ["", "https://", "http:///admin", "https://:8443/x", "/just/a/path"] {
            assert!(
                matches!(extract_domain(t), Err(ScanError::DomainExtraction(_))),
                "target: {t:?}"
            );
        }
    }

    #[test]
    fn joins_and_sanitizes() {
        assert_eq!(join_target("http://t.local/", "/api/v1"), "http://t.local/api/v1");
        assert_eq!(join_target("http://t.local", "/admin"), "http://t.local/admin");
        assert_eq!(sanitize_path("/api/v1"), "_api_v1");
    }
}
