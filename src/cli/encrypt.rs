//! `credsync encrypt`: bundle local credential files into the envelope

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::{Settings, WorkspacePaths};
use crate::credentials::Gatherer;
use crate::crypto::{encode, load_key, KeySource};
use crate::error::{CredsyncError, CredsyncResult};
use crate::storage::write_atomic;

/// Arguments for `encrypt`
#[derive(Args, Debug, Default)]
pub struct EncryptArgs {
    /// Envelope file to write (defaults to the configured envelope file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Gather, seal and write the envelope, returning its path
///
/// The key is resolved before anything is read or written.
pub fn handle_encrypt_command(
    paths: &WorkspacePaths,
    settings: &Settings,
    key_source: &dyn KeySource,
    args: EncryptArgs,
) -> CredsyncResult<PathBuf> {
    println!("Encrypting credentials...");
    println!();

    let key = load_key(key_source)?;

    let allow_list = settings.allow_list();
    let gatherer = Gatherer::new(paths.base_dir(), settings.credentials.clone(), &allow_list)?;
    let gathered = gatherer.gather()?;

    for (name, bytes) in &gathered.found {
        println!("  Found {} ({} bytes)", name, bytes);
    }

    if gathered.files.is_empty() {
        return Err(CredsyncError::MissingInput(
            "No credential files to encrypt".into(),
        ));
    }

    let envelope = encode(&key, &gathered.files)?;

    let output = match args.output {
        Some(path) => paths.resolve(path),
        None => paths.envelope_file(settings),
    };
    write_atomic(&output, envelope.as_bytes())?;
    info!(output = %output.display(), files = gathered.files.len(), "envelope written");

    println!();
    println!(
        "Encrypted {} file(s) to {}",
        gathered.files.len(),
        output.display()
    );
    println!("  Size: {} bytes", envelope.len());
    println!();
    println!("This file is safe to commit to git.");
    println!("To restore: credsync decrypt");

    Ok(output)
}
