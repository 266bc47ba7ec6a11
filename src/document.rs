//! Guidebook input: a file path, or `-` for stdin.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// A guidebook as read from disk or stdin.
#[derive(Debug, Clone)]
pub struct Guidebook {
    /// Where the text came from (`"-"` for stdin).
    pub source: String,
    pub body: String,
}

impl Guidebook {
    pub fn new(source: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            body: body.into(),
        }
    }

    /// Hex SHA-256 of the body, for spotting duplicate guidebooks in scans.
    pub fn sha256(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.body.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Read a guidebook from `path`, or from stdin when `path` is `-`.
pub fn read_guidebook(path: &Path) -> Result<Guidebook> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read guidebook from stdin")?;
        return Ok(Guidebook::new("-", body));
    }

    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read guidebook: {}", path.display()))?;
    Ok(Guidebook::new(path.display().to_string(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("guide.md");
        std::fs::write(&path, "Tempo: 90 BPM").unwrap();
        let guidebook = read_guidebook(&path).unwrap();
        assert_eq!(guidebook.body, "Tempo: 90 BPM");
        assert!(guidebook.source.ends_with("guide.md"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_guidebook(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(err.to_string().contains("Failed to read guidebook"));
    }

    #[test]
    fn test_hash_is_stable() {
        let a = Guidebook::new("a", "same text");
        let b = Guidebook::new("b", "same text");
        assert_eq!(a.sha256(), b.sha256());
        assert_eq!(a.sha256().len(), 64);
        assert_ne!(a.sha256(), Guidebook::new("c", "other").sha256());
    }
}
