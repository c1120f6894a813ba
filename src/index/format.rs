//! Formatting helpers for index lines

use std::time::SystemTime;

use chrono::{DateTime, Local};

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Connector for an entry with siblings after it
pub const BRANCH: &str = "├── ";
/// Connector for the last entry of a directory
pub const LAST_BRANCH: &str = "└── ";
/// Prefix continuation under a non-last entry
pub const PIPE_INDENT: &str = "│   ";
/// Prefix continuation under a last entry
pub const SPACE_INDENT: &str = "    ";

/// Human-readable size: raw bytes below 1 KiB, then K/M/G with one decimal
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{:4}", bytes)
    } else if bytes < MIB {
        format!("{:.1}K", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1}M", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1}G", bytes as f64 / GIB as f64)
    }
}

/// Modification time in local time
pub fn format_mtime(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// The bracketed `[size mtime]` stamp
pub fn format_stamp(bytes: u64, mtime: &str) -> String {
    format!("[{:>4} {}]", format_size(bytes), mtime)
}
