//! Storage layer for credsync
//!
//! Raw file reads and atomic writes shared by the envelope, restore and
//! index commands.

pub mod file_io;

pub use file_io::{read_bytes_required, read_json, write_atomic, write_text_atomic};
