pub mod line;

pub use line::parse_line;

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{Result, ScanError};
use crate::model::{Finding, ScanType};

/// Read a result file written by the tool and return its findings in file order.
///
/// Lines are split on raw bytes and decoded lossily, so a stray non-UTF-8
/// byte only affects the line it sits on.
pub async fn parse_file(path: &Path, scan_type: ScanType) -> Result<Vec<Finding>> {
    let file = tokio::fs::File::open(path).await.map_err(|source| ScanError::ResultFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut out = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|source| ScanError::ResultFile { path: path.to_path_buf(), source })?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some(finding) = parse_line(&line, scan_type) {
            out.push(finding);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parse_file_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directories_1.txt");
        std::fs::write(
            &path,
            "===============\n/b (Status: 403) [Size: 10]\n\nnoise\n/a (Status: 200) [Size: 20]\n",
        )
        .unwrap();

        let found = parse_file(&path, ScanType::Directory).await.unwrap();
        let urls: Vec<_> = found.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, ["/b", "/a"]);
    }

    #[tokio::test]
    async fn invalid_utf8_byte_keeps_surrounding_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directories_1.txt");
        let mut body = b"/admin (Status: 200) [Size: 512]\n/caf".to_vec();
        body.push(0xE9);
        body.extend_from_slice(b" (Status: 200) [Size: 1]\n/login (Status: 302) [Size: 0]\n");
        std::fs::write(&path, body).unwrap();

        let found = parse_file(&path, ScanType::Directory).await.unwrap();
        let urls: Vec<_> = found.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, ["/admin", "/caf\u{FFFD}", "/login"]);
        assert_eq!(found[1].status_code, 200);
    }

    #[tokio::test]
    async fn missing_file_is_result_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("nope.txt"), ScanType::Vhost).await.unwrap_err();
        assert!(matches!(err, ScanError::ResultFile { .. }));
    }
}
