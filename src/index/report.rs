//! The Markdown file index report

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::{CredsyncError, CredsyncResult};
use crate::storage::write_text_atomic;

use super::format::{format_mtime, format_stamp};
use super::tree::IndexOptions;

/// Timestamp format for the `**Generated:**` line
///
/// Local wall-clock time with an empty zone slot, hence the double space
/// before the year.
pub const GENERATED_FORMAT: &str = "%a %b %d %H:%M:%S  %Y";

/// A rendered directory index
#[derive(Debug, Clone)]
pub struct IndexReport {
    /// Canonical path of the indexed directory
    pub root: PathBuf,
    pub generated_at: DateTime<Local>,
    pub root_size: u64,
    pub root_modified: String,
    /// Tree lines below the root
    pub lines: Vec<String>,
}

impl IndexReport {
    pub fn entry_count(&self) -> usize {
        self.lines.len()
    }

    /// The first line of the tree, standing for the root itself
    pub fn root_line(&self) -> String {
        format!("{}  ./", format_stamp(self.root_size, &self.root_modified))
    }

    /// Render the report as Markdown
    ///
    /// The generation time is printed in local time without a zone name or
    /// offset, see [`GENERATED_FORMAT`].
    pub fn to_markdown(&self) -> String {
        format!(
            "# File System Index\n\
             \n\
             **Generated:** {generated}\n\
             **Directory:** {root}\n\
             \n\
             ---\n\
             \n\
             ```\n\
             {root_line}\n\
             {tree}\n\
             ```\n\
             \n\
             ---\n\
             \n\
             *Index contains {count} entries*\n",
            generated = self.generated_at.format(GENERATED_FORMAT),
            root = self.root.display(),
            root_line = self.root_line(),
            tree = self.lines.join("\n"),
            count = self.entry_count(),
        )
    }
}

/// Walk `root` and build its index report
pub fn generate_index(root: &Path, options: &IndexOptions) -> CredsyncResult<IndexReport> {
    let root = root.canonicalize().map_err(|_| {
        CredsyncError::MissingInput(format!("Directory does not exist: {}", root.display()))
    })?;

    let meta = fs::metadata(&root)
        .map_err(|e| CredsyncError::Io(format!("Failed to stat {}: {}", root.display(), e)))?;
    if !meta.is_dir() {
        return Err(CredsyncError::MissingInput(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    info!(root = %root.display(), max_depth = options.max_depth, "indexing directory");

    let root_modified = format_mtime(meta.modified()?);
    let root_size = options.dir_size(&root);
    let lines = options.build_tree(&root);

    Ok(IndexReport {
        root,
        generated_at: Local::now(),
        root_size,
        root_modified,
        lines,
    })
}

/// Write the report, creating the output directory if needed
pub fn write_report(report: &IndexReport, output: &Path) -> CredsyncResult<()> {
    write_text_atomic(output, &report.to_markdown())?;
    info!(output = %output.display(), entries = report.entry_count(), "index written");
    Ok(())
}
