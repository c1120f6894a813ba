//! Credential files: the set, its allow-list, and the disk shell around it
//!
//! # Flow
//!
//! - `Gatherer`: reads the configured credential sources into a `CredentialSet`
//! - `crypto::encode` / `crypto::decode`: seal and open the set
//! - `Restorer`: writes allow-listed entries of a decoded set back to disk

mod allow_list;
mod gather;
mod restore;
mod set;

pub use allow_list::{is_plain_name, AllowList, DEFAULT_ALLOWED_NAMES};
pub use gather::{GatherReport, Gatherer};
pub use restore::{RestoreReport, RestoredFile, Restorer};
pub use set::CredentialSet;
