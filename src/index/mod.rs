//! Directory tree indexer
//!
//! Walks a directory and produces a Markdown report listing every included
//! entry with its size and modification time. Independent of the credential
//! envelope.
//!
//! # Example
//!
//! ```rust,ignore
//! use credsync::index::{generate_index, write_report, IndexOptions};
//!
//! let report = generate_index(Path::new("."), &IndexOptions::default())?;
//! write_report(&report, Path::new("memory/file_index.md"))?;
//! ```

mod format;
mod report;
mod tree;

pub use format::{format_mtime, format_size};
pub use report::{generate_index, write_report, IndexReport};
pub use tree::{IndexOptions, DEFAULT_INCLUDE_HIDDEN, DEFAULT_MAX_DEPTH, DEFAULT_SKIP_NAMES};
