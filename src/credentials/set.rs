//! The credential set: relative file name to text content

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CredsyncError, CredsyncResult};

/// Mapping from relative file name to file content
///
/// Names are unique. Entries are kept ordered by name so listings and the
/// serialized document are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet {
    files: BTreeMap<String, String>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, returning the previous content if the name was present
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.files.insert(name.into(), content.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize to the JSON document sealed inside an envelope
    pub fn to_document(&self) -> CredsyncResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a decrypted document
    ///
    /// The document must be UTF-8 JSON holding an object whose values are
    /// all strings.
    pub fn from_document(document: &[u8]) -> CredsyncResult<Self> {
        let text = std::str::from_utf8(document)
            .map_err(|e| CredsyncError::Format(format!("not valid UTF-8: {}", e)))?;

        serde_json::from_str(text).map_err(|e| CredsyncError::Format(e.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
