use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credsync::cli::{
    handle_decrypt_command, handle_encrypt_command, handle_index_command, handle_verify_command,
    DecryptArgs, EncryptArgs, IndexArgs,
};
use credsync::config::{Settings, WorkspacePaths};
use credsync::CredsyncError;

#[derive(Parser)]
#[command(
    name = "credsync",
    version,
    about = "Encrypted credential bundles and directory indexes",
    long_about = "credsync bundles local credential files (.env, .mcp.json) into a single \
                  AES-256-GCM envelope that is safe to commit, restores them on another \
                  machine, and writes Markdown indexes of directory trees."
)]
struct Cli {
    /// Working directory for credential files, the envelope and settings
    #[arg(long, global = true, env = "CREDSYNC_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt local credential files into the envelope
    #[command(alias = "seal")]
    Encrypt(EncryptArgs),

    /// Decrypt the envelope and restore credential files
    #[command(alias = "restore")]
    Decrypt(DecryptArgs),

    /// Check the envelope opens under the key and list its contents
    Verify(DecryptArgs),

    /// Write a Markdown index of a directory tree
    Index(IndexArgs),

    /// Show resolved paths and settings
    Config,
}

fn main() -> ExitCode {
    // RUST_LOG=credsync=debug for verbose output; key material is never logged
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("credsync=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(hint) = err.downcast_ref::<CredsyncError>().and_then(|e| e.hint()) {
                eprintln!();
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = WorkspacePaths::new(cli.dir)?;
    let settings = Settings::load_or_default(&paths)?;

    match cli.command {
        Commands::Encrypt(args) => {
            handle_encrypt_command(&paths, &settings, &settings.key_source(), args)?;
        }
        Commands::Decrypt(args) => {
            handle_decrypt_command(&paths, &settings, &settings.key_source(), args)?;
        }
        Commands::Verify(args) => {
            handle_verify_command(&paths, &settings, &settings.key_source(), args)?;
        }
        Commands::Index(args) => {
            handle_index_command(&paths, &settings, args)?;
        }
        Commands::Config => show_config(&paths, &settings)?,
    }

    Ok(())
}

fn show_config(paths: &WorkspacePaths, settings: &Settings) -> Result<()> {
    println!("credsync Configuration");
    println!("======================");
    println!("Working directory: {}", paths.base_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Envelope file:     {}", paths.envelope_file(settings).display());
    println!("Index output:      {}", paths.index_output(settings).display());
    println!();
    println!("Settings:");
    println!("  Key variable: {}", settings.key_env_var);
    let key_state = match std::env::var(&settings.key_env_var) {
        Ok(value) if !value.trim().is_empty() => "set",
        _ => "not set",
    };
    println!("  Key present:  {}", key_state);
    println!("  Credential files:");
    for source in &settings.credentials {
        let kind = if source.required { "required" } else { "optional" };
        println!("    {} ({})", source.name, kind);
    }
    let allow_list = settings.allow_list();
    println!(
        "  Allow-list:   {}",
        allow_list.names().collect::<Vec<_>>().join(", ")
    );
    println!("  Index depth:  {}", settings.index.max_depth);

    Ok(())
}
