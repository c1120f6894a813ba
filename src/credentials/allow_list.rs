//! The set of file names the restorer is permitted to write

use std::collections::BTreeSet;

use crate::error::{CredsyncError, CredsyncResult};

/// Names permitted when no configuration overrides them
pub const DEFAULT_ALLOWED_NAMES: [&str; 3] = [".env", ".mcp.json", ".mcp.json.template"];

/// Explicit set of permitted relative names
///
/// Matching is by exact string. Names that would need normalization before
/// use are never permitted, see [`is_plain_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    names: BTreeSet<String>,
}

impl AllowList {
    /// Build an allow-list, rejecting any entry that is not a plain name
    pub fn new<I, S>(names: I) -> CredsyncResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if !is_plain_name(&name) {
                return Err(CredsyncError::Config(format!(
                    "allow-list entry '{}' is not a plain relative file name",
                    name
                )));
            }
            set.insert(name);
        }
        Ok(Self { names: set })
    }

    /// Keep only the names also present in `names`
    ///
    /// The result never permits anything this list does not already permit.
    pub fn narrowed_to<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<&str> = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.names.get(name).map(String::as_str)
            })
            .collect();

        Self {
            names: requested.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn permits(&self, name: &str) -> bool {
        is_plain_name(name) && self.names.contains(name)
    }

    /// Like [`AllowList::permits`], as a recoverable error
    pub fn check(&self, name: &str) -> CredsyncResult<()> {
        if self.permits(name) {
            Ok(())
        } else {
            Err(CredsyncError::DisallowedName(name.to_string()))
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self {
            names: DEFAULT_ALLOWED_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Whether a name is a single file name in the working directory
///
/// Rejects empty names, `.` and `..`, and anything containing a path
/// separator, drive prefix or NUL. Nested names are refused because a
/// symlinked parent directory would redirect the write.
pub fn is_plain_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    !name.contains(['/', '\\', '\0', ':'])
}
