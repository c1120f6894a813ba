//! `credsync decrypt` and `credsync verify`: open the envelope

use std::path::PathBuf;

use clap::Args;

use crate::config::{Settings, WorkspacePaths};
use crate::credentials::{CredentialSet, RestoreReport, Restorer};
use crate::crypto::{decode, load_key, Envelope, KeySource};
use crate::error::CredsyncResult;
use crate::storage::read_bytes_required;

/// Arguments for `decrypt` and `verify`
#[derive(Args, Debug, Default)]
pub struct DecryptArgs {
    /// Envelope file to read (defaults to the configured envelope file)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl DecryptArgs {
    fn envelope_path(&self, paths: &WorkspacePaths, settings: &Settings) -> PathBuf {
        match &self.input {
            Some(path) => paths.resolve(path),
            None => paths.envelope_file(settings),
        }
    }
}

/// Resolve the key, then read and decode the envelope
fn open_envelope(
    paths: &WorkspacePaths,
    settings: &Settings,
    key_source: &dyn KeySource,
    args: &DecryptArgs,
) -> CredsyncResult<CredentialSet> {
    let input = args.envelope_path(paths, settings);
    let key = load_key(key_source)?;

    println!("Decrypting {}...", input.display());
    println!();

    let envelope = Envelope::from_bytes(read_bytes_required(&input)?);
    decode(&key, &envelope)
}

/// Decode the envelope and restore allow-listed files into the working directory
pub fn handle_decrypt_command(
    paths: &WorkspacePaths,
    settings: &Settings,
    key_source: &dyn KeySource,
    args: DecryptArgs,
) -> CredsyncResult<RestoreReport> {
    let allow_list = settings.allow_list();
    let files = open_envelope(paths, settings, key_source, &args)?;

    let report = Restorer::new(paths.base_dir(), allow_list).restore(&files)?;

    for name in &report.skipped {
        println!("  Skipping unexpected file: {}", name);
    }
    for file in &report.written {
        if file.overwritten {
            println!("  Wrote {} ({} bytes, replaced existing file)", file.name, file.bytes);
        } else {
            println!("  Wrote {} ({} bytes)", file.name, file.bytes);
        }
    }

    println!();
    println!("{}", report.summary());
    println!();
    println!("SECURITY REMINDER:");
    println!("  - .env should be in .gitignore (don't commit)");
    println!("  - .mcp.json may contain secrets (check .gitignore)");

    Ok(report)
}

/// Decode the envelope and list its entries without writing anything
pub fn handle_verify_command(
    paths: &WorkspacePaths,
    settings: &Settings,
    key_source: &dyn KeySource,
    args: DecryptArgs,
) -> CredsyncResult<CredentialSet> {
    let allow_list = settings.allow_list();
    let files = open_envelope(paths, settings, key_source, &args)?;

    println!("Envelope is authentic and contains {} file(s):", files.len());
    for (name, content) in files.iter() {
        let marker = if allow_list.permits(name) {
            ""
        } else {
            "  (not on allow-list, would be skipped)"
        };
        println!("  {} ({} bytes){}", name, content.len(), marker);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{encode, StaticKeySource, SymmetricKey};
    use crate::error::CredsyncError;
    use std::fs;
    use tempfile::TempDir;

    const KEY_HEX: &str = "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100";

    fn workspace_with_envelope(files: &CredentialSet) -> (TempDir, WorkspacePaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = WorkspacePaths::with_base_dir(temp_dir.path().to_path_buf());
        let key = SymmetricKey::from_hex(KEY_HEX).unwrap();
        let envelope = encode(&key, files).unwrap();
        fs::write(paths.resolve(".credentials.enc"), envelope.as_bytes()).unwrap();
        (temp_dir, paths)
    }

    #[test]
    fn test_decrypt_restores_files() {
        let files: CredentialSet = [(".env", "A=1"), (".mcp.json", "{}")]
            .into_iter()
            .collect();
        let (_temp_dir, paths) = workspace_with_envelope(&files);
        let source = StaticKeySource::new("TEST_KEY", Some(KEY_HEX));

        let report = handle_decrypt_command(
            &paths,
            &Settings::default(),
            &source,
            DecryptArgs::default(),
        )
        .unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(fs::read_to_string(paths.resolve(".env")).unwrap(), "A=1");
        assert_eq!(fs::read_to_string(paths.resolve(".mcp.json")).unwrap(), "{}");
    }

    #[test]
    fn test_decrypt_skips_names_outside_allow_list() {
        let files: CredentialSet = [(".env", "A=1"), ("evil.sh", "rm -rf /")]
            .into_iter()
            .collect();
        let (_temp_dir, paths) = workspace_with_envelope(&files);
        let source = StaticKeySource::new("TEST_KEY", Some(KEY_HEX));

        let report = handle_decrypt_command(
            &paths,
            &Settings::default(),
            &source,
            DecryptArgs::default(),
        )
        .unwrap();

        assert_eq!(report.skipped, vec!["evil.sh".to_string()]);
        assert!(paths.resolve(".env").exists());
        assert!(!paths.resolve("evil.sh").exists());
    }

    #[test]
    fn test_settings_file_cannot_widen_what_decrypt_writes() {
        let files: CredentialSet = [
            (".env", "A=1"),
            (".git/hooks/post-checkout", "#!/bin/sh\ntouch pwned\n"),
        ]
        .into_iter()
        .collect();
        let (_temp_dir, paths) = workspace_with_envelope(&files);
        fs::create_dir_all(paths.resolve(".git/hooks")).unwrap();
        fs::write(
            paths.settings_file(),
            r#"{"allow_list": [".env", ".git/hooks/post-checkout"]}"#,
        )
        .unwrap();
        let settings = Settings::load_or_default(&paths).unwrap();
        let source = StaticKeySource::new("TEST_KEY", Some(KEY_HEX));

        let report =
            handle_decrypt_command(&paths, &settings, &source, DecryptArgs::default()).unwrap();

        assert_eq!(report.skipped, vec![".git/hooks/post-checkout".to_string()]);
        assert_eq!(report.written.len(), 1);
        assert!(paths.resolve(".env").exists());
        assert!(!paths.resolve(".git/hooks/post-checkout").exists());
    }

    #[test]
    fn test_decrypt_wrong_key_writes_nothing() {
        let files: CredentialSet = [(".env", "A=1")].into_iter().collect();
        let (_temp_dir, paths) = workspace_with_envelope(&files);
        let other = "ff".repeat(32);
        let source = StaticKeySource::new("TEST_KEY", Some(other.as_str()));

        let err = handle_decrypt_command(
            &paths,
            &Settings::default(),
            &source,
            DecryptArgs::default(),
        )
        .unwrap_err();

        assert!(err.is_authentication());
        assert!(!paths.resolve(".env").exists());
    }

    #[test]
    fn test_decrypt_missing_key_writes_nothing() {
        let files: CredentialSet = [(".env", "A=1")].into_iter().collect();
        let (_temp_dir, paths) = workspace_with_envelope(&files);
        let source = StaticKeySource::new("TEST_KEY", None);

        let err = handle_decrypt_command(
            &paths,
            &Settings::default(),
            &source,
            DecryptArgs::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CredsyncError::MissingKey { .. }));
        assert!(!paths.resolve(".env").exists());
    }

    #[test]
    fn test_decrypt_missing_envelope() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WorkspacePaths::with_base_dir(temp_dir.path().to_path_buf());
        let source = StaticKeySource::new("TEST_KEY", Some(KEY_HEX));

        let err = handle_decrypt_command(
            &paths,
            &Settings::default(),
            &source,
            DecryptArgs::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CredsyncError::MissingInput(_)));
    }

    #[test]
    fn test_verify_lists_without_writing() {
        let files: CredentialSet = [(".env", "A=1"), ("extra", "x")].into_iter().collect();
        let (_temp_dir, paths) = workspace_with_envelope(&files);
        let source = StaticKeySource::new("TEST_KEY", Some(KEY_HEX));

        let decoded = handle_verify_command(
            &paths,
            &Settings::default(),
            &source,
            DecryptArgs::default(),
        )
        .unwrap();

        assert_eq!(decoded, files);
        assert!(!paths.resolve(".env").exists());
        assert!(!paths.resolve("extra").exists());
    }
}
