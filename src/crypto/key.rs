//! Symmetric key handling
//!
//! The credential key is a 256-bit secret supplied from outside the process
//! as 64 hex characters. Where it comes from is abstracted behind
//! [`KeySource`] so the codec never reads process state itself.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CredsyncError, CredsyncResult};

/// Size of the AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Environment variable consulted when settings don't name another one
pub const DEFAULT_KEY_ENV_VAR: &str = "CREDENTIAL_ENCRYPTION_KEY";

/// A 256-bit credential key, zeroed when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_SIZE],
}

impl SymmetricKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Parse a key from its hex representation
    ///
    /// Leading and trailing whitespace is ignored. Anything other than
    /// exactly 64 hex digits is rejected.
    pub fn from_hex(hex_key: &str) -> CredsyncResult<Self> {
        let trimmed = hex_key.trim();

        if trimmed.len() != KEY_SIZE * 2 {
            return Err(CredsyncError::MalformedKey(format!(
                "expected {} hex characters, got {}",
                KEY_SIZE * 2,
                trimmed.len()
            )));
        }

        let mut key = [0u8; KEY_SIZE];
        hex::decode_to_slice(trimmed, &mut key)
            .map_err(|e| CredsyncError::MalformedKey(format!("not valid hex: {}", e)))?;

        Ok(Self { key })
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

// Never print key material
impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Somewhere a hex-encoded key can be looked up
pub trait KeySource {
    /// Human-readable name of the source, used in error messages
    fn name(&self) -> &str;

    /// The raw hex string, if the source has one
    fn fetch(&self) -> Option<Zeroizing<String>>;
}

/// Reads the key from an environment variable
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKeySource {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_ENV_VAR)
    }
}

impl KeySource for EnvKeySource {
    fn name(&self) -> &str {
        &self.var
    }

    fn fetch(&self) -> Option<Zeroizing<String>> {
        std::env::var(&self.var).ok().map(Zeroizing::new)
    }
}

/// A fixed value, for callers that already hold the hex key
pub struct StaticKeySource {
    name: String,
    value: Option<Zeroizing<String>>,
}

impl StaticKeySource {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(|v| Zeroizing::new(v.to_string())),
        }
    }
}

impl KeySource for StaticKeySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Option<Zeroizing<String>> {
        self.value.clone()
    }
}

/// Resolve and parse the key from a source
///
/// An absent or blank value is a [`CredsyncError::MissingKey`]; anything
/// else that fails to parse is a [`CredsyncError::MalformedKey`].
pub fn load_key(source: &dyn KeySource) -> CredsyncResult<SymmetricKey> {
    let raw = source
        .fetch()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CredsyncError::MissingKey {
            var: source.name().to_string(),
        })?;

    SymmetricKey::from_hex(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_KEY_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_from_hex_zero_key() {
        let key = SymmetricKey::from_hex(ZERO_KEY_HEX).unwrap();
        assert_eq!(key.as_bytes(), &[0u8; KEY_SIZE]);
    }

    #[test]
    fn test_from_hex_trims_whitespace_and_accepts_uppercase() {
        let hex_key = format!("  {}\n", "AB".repeat(KEY_SIZE));
        let key = SymmetricKey::from_hex(&hex_key).unwrap();
        assert_eq!(key.as_bytes(), &[0xAB; KEY_SIZE]);
    }

    #[test]
    fn test_from_hex_wrong_length() {
        let err = SymmetricKey::from_hex("abcd").unwrap_err();
        assert!(matches!(err, CredsyncError::MalformedKey(_)));
        assert!(err.to_string().contains("expected 64 hex characters, got 4"));
    }

    #[test]
    fn test_from_hex_not_hex() {
        let err = SymmetricKey::from_hex(&"zz".repeat(KEY_SIZE)).unwrap_err();
        assert!(matches!(err, CredsyncError::MalformedKey(_)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SymmetricKey::from_bytes([0x42; KEY_SIZE]);
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("42"));
    }

    #[test]
    fn test_load_key_missing() {
        let source = StaticKeySource::new("TEST_KEY", None);
        let err = load_key(&source).unwrap_err();
        assert!(matches!(err, CredsyncError::MissingKey { ref var } if var == "TEST_KEY"));
    }

    #[test]
    fn test_load_key_blank_is_missing() {
        let source = StaticKeySource::new("TEST_KEY", Some("   "));
        assert!(matches!(
            load_key(&source),
            Err(CredsyncError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_load_key_malformed() {
        let source = StaticKeySource::new("TEST_KEY", Some("not-a-key"));
        assert!(matches!(
            load_key(&source),
            Err(CredsyncError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_load_key_valid() {
        let source = StaticKeySource::new("TEST_KEY", Some(ZERO_KEY_HEX));
        let key = load_key(&source).unwrap();
        assert_eq!(key.as_bytes(), &[0u8; KEY_SIZE]);
    }

    #[test]
    fn test_env_key_source_reads_variable() {
        let var = "CREDSYNC_TEST_ENV_KEY_SOURCE";
        std::env::set_var(var, ZERO_KEY_HEX);

        let source = EnvKeySource::new(var);
        assert_eq!(source.name(), var);
        assert_eq!(source.fetch().as_deref().map(String::as_str), Some(ZERO_KEY_HEX));

        std::env::remove_var(var);
        assert!(source.fetch().is_none());
    }
}
