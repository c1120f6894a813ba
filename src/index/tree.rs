//! Directory walking for the index report

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::format::{format_mtime, format_stamp, BRANCH, LAST_BRANCH, PIPE_INDENT, SPACE_INDENT};

/// Names never listed or counted
pub const DEFAULT_SKIP_NAMES: [&str; 8] = [
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "dist",
    "build",
    ".DS_Store",
];

/// Dot-names listed despite being hidden
pub const DEFAULT_INCLUDE_HIDDEN: [&str; 1] = [".claude"];

/// Default recursion limit
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// What the indexer lists and how deep it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub skip_names: BTreeSet<String>,
    pub include_hidden: BTreeSet<String>,
    /// Deepest level listed; children of the root are level 0
    pub max_depth: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            skip_names: DEFAULT_SKIP_NAMES.iter().map(|n| n.to_string()).collect(),
            include_hidden: DEFAULT_INCLUDE_HIDDEN.iter().map(|n| n.to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl IndexOptions {
    /// Whether an entry with this name is listed
    pub fn should_include(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        if self.skip_names.contains(name.as_ref()) {
            return false;
        }
        if name.starts_with('.') {
            return self.include_hidden.contains(name.as_ref());
        }
        true
    }

    /// Total size of the files under a directory
    ///
    /// Symlinks are not followed and excluded directories are not entered.
    /// Files are always counted, hidden or not. Unreadable parts count as zero.
    pub fn dir_size(&self, dir: &Path) -> u64 {
        WalkDir::new(dir)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !e.file_type().is_dir() || self.should_include(e.file_name()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum()
    }

    /// Render the tree below `dir` as index lines
    pub fn build_tree(&self, dir: &Path) -> Vec<String> {
        let mut lines = Vec::new();
        self.build_level(dir, "", 0, &mut lines);
        lines
    }

    fn build_level(&self, dir: &Path, prefix: &str, depth: usize, lines: &mut Vec<String>) {
        if depth > self.max_depth {
            return;
        }

        let entries = self.list_children(dir);
        let count = entries.len();

        for (i, entry) in entries.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            let name = entry.file_name().to_string_lossy();

            let (meta, mtime) = match entry_stamp(&entry) {
                Ok(stamp) => stamp,
                Err(e) => {
                    lines.push(format!("{}{}[ERROR]  {} - {}", prefix, connector, name, e));
                    continue;
                }
            };

            if meta.is_dir() {
                let size = self.dir_size(entry.path());
                lines.push(format!(
                    "{}{}{}  {}/",
                    prefix,
                    connector,
                    format_stamp(size, &mtime),
                    name
                ));

                let extension = if is_last { SPACE_INDENT } else { PIPE_INDENT };
                let child_prefix = format!("{}{}", prefix, extension);
                self.build_level(entry.path(), &child_prefix, depth + 1, lines);
            } else {
                lines.push(format!(
                    "{}{}{}  {}",
                    prefix,
                    connector,
                    format_stamp(meta.len(), &mtime),
                    name
                ));
            }
        }
    }

    /// Included children of a directory, directories first, then by lowercase name
    fn list_children(&self, dir: &Path) -> Vec<DirEntry> {
        let mut children = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by(directories_first)
        {
            match entry {
                Ok(entry) if self.should_include(entry.file_name()) => children.push(entry),
                Ok(_) => {}
                Err(e) => debug!(dir = %dir.display(), error = %e, "skipping unreadable entry"),
            }
        }

        children
    }
}

/// Sort key follows symlinks; rendering does not
fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.path()
        .is_dir()
        .cmp(&a.path().is_dir())
        .then_with(|| {
            let a = a.file_name().to_string_lossy().to_lowercase();
            let b = b.file_name().to_string_lossy().to_lowercase();
            a.cmp(&b)
        })
}

fn entry_stamp(entry: &DirEntry) -> io::Result<(Metadata, String)> {
    let meta = entry.metadata().map_err(io::Error::from)?;
    let mtime = format_mtime(meta.modified()?);
    Ok((meta, mtime))
}
