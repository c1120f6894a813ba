//! Writes a decoded credential set back to disk
//!
//! Only allow-listed names are written. Anything else in the set is skipped
//! with a warning and the rest of the restore carries on.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::CredsyncResult;
use crate::storage::write_text_atomic;

use super::{AllowList, CredentialSet};

/// A file written during a restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredFile {
    pub name: String,
    pub bytes: usize,
    /// Whether an existing file was replaced
    pub overwritten: bool,
}

/// Result of a restore operation
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub written: Vec<RestoredFile>,
    /// Names rejected by the allow-list
    pub skipped: Vec<String>,
}

impl RestoreReport {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        let mut summary = format!("Restored {} credential file(s)", self.written.len());
        if !self.skipped.is_empty() {
            summary.push_str(&format!(
                ", skipped {} unexpected file(s)",
                self.skipped.len()
            ));
        }
        summary
    }
}

/// Restores credential files into a directory
pub struct Restorer {
    base_dir: PathBuf,
    allow_list: AllowList,
}

impl Restorer {
    pub fn new(base_dir: impl Into<PathBuf>, allow_list: AllowList) -> Self {
        Self {
            base_dir: base_dir.into(),
            allow_list,
        }
    }

    /// Write every allow-listed entry of the set
    ///
    /// Each file is replaced atomically. A failure to write aborts the
    /// restore; files already written stay written.
    pub fn restore(&self, files: &CredentialSet) -> CredsyncResult<RestoreReport> {
        let mut report = RestoreReport::default();

        for (name, content) in files.iter() {
            if let Err(err) = self.allow_list.check(name) {
                warn!("{}", err);
                report.skipped.push(name.to_string());
                continue;
            }

            let path = self.base_dir.join(name);
            let overwritten = path.exists();
            if overwritten {
                warn!("Overwriting existing {}", name);
            }

            write_text_atomic(&path, content)?;
            info!(file = %name, bytes = content.len(), "restored credential file");

            report.written.push(RestoredFile {
                name: name.to_string(),
                bytes: content.len(),
                overwritten,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_restores_allowed_files() {
        let temp_dir = TempDir::new().unwrap();
        let files: CredentialSet = [(".env", "A=1"), (".mcp.json", "{}")]
            .into_iter()
            .collect();

        let report = Restorer::new(temp_dir.path(), AllowList::default())
            .restore(&files)
            .unwrap();

        assert_eq!(report.written.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join(".env")).unwrap(),
            "A=1"
        );
    }

    #[test]
    fn test_disallowed_names_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let files: CredentialSet = [
            (".env", "A=1"),
            ("authorized_keys", "ssh-ed25519 AAAA"),
            ("../escape", "x"),
        ]
        .into_iter()
        .collect();

        let report = Restorer::new(temp_dir.path(), AllowList::default())
            .restore(&files)
            .unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.written[0].name, ".env");
        assert_eq!(report.skipped.len(), 2);
        assert!(!temp_dir.path().join("authorized_keys").exists());
        assert!(!temp_dir.path().parent().unwrap().join("escape").exists());
        assert_eq!(
            report.summary(),
            "Restored 1 credential file(s), skipped 2 unexpected file(s)"
        );
    }

    #[test]
    fn test_injected_allow_list() {
        let temp_dir = TempDir::new().unwrap();
        let allow = AllowList::new(["secrets.toml"]).unwrap();
        let files: CredentialSet = [("secrets.toml", "k = 1"), (".env", "A=1")]
            .into_iter()
            .collect();

        let report = Restorer::new(temp_dir.path(), allow).restore(&files).unwrap();

        assert_eq!(report.skipped, vec![".env".to_string()]);
        assert!(temp_dir.path().join("secrets.toml").exists());
    }

    #[test]
    fn test_overwrite_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "OLD=1").unwrap();
        let files: CredentialSet = [(".env", "NEW=1")].into_iter().collect();

        let report = Restorer::new(temp_dir.path(), AllowList::default())
            .restore(&files)
            .unwrap();

        assert!(report.written[0].overwritten);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join(".env")).unwrap(),
            "NEW=1"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_parent_does_not_redirect_writes() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("config")).unwrap();
        let allow = AllowList::new(["app.json", ".env"]).unwrap();
        let files: CredentialSet = [("config/app.json", "x"), (".env", "A=1")]
            .into_iter()
            .collect();

        let report = Restorer::new(temp_dir.path(), allow).restore(&files).unwrap();

        assert_eq!(report.skipped, vec!["config/app.json".to_string()]);
        assert_eq!(report.written.len(), 1);
        assert!(!outside.path().join("app.json").exists());
        assert_eq!(fs::read_dir(outside.path()).unwrap().count(), 0);
    }
}
