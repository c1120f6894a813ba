//! `credsync index`: write a Markdown index of a directory tree

use std::path::PathBuf;

use clap::Args;

use crate::config::{Settings, WorkspacePaths};
use crate::error::CredsyncResult;
use crate::index::{generate_index, write_report};

/// Arguments for `index`
#[derive(Args, Debug, Default)]
pub struct IndexArgs {
    /// Directory to index (defaults to the working directory)
    pub root: Option<PathBuf>,

    /// Report file (defaults to memory/file_index.md)
    pub output: Option<PathBuf>,

    /// Deepest level to descend into
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Index a directory and write the report, returning the report path
pub fn handle_index_command(
    paths: &WorkspacePaths,
    settings: &Settings,
    args: IndexArgs,
) -> CredsyncResult<PathBuf> {
    let mut options = settings.index.options();
    if let Some(depth) = args.max_depth {
        options.max_depth = depth;
    }

    let root = match args.root {
        Some(root) => paths.resolve(root),
        None => paths.base_dir().to_path_buf(),
    };
    let output = match args.output {
        Some(output) => paths.resolve(output),
        None => paths.index_output(settings),
    };

    let report = generate_index(&root, &options)?;
    println!("Indexing: {}", report.root.display());

    write_report(&report, &output)?;
    println!("Index saved to: {}", output.display());
    println!("Total entries: {}", report.entry_count());

    Ok(output)
}
