//! AES-256-GCM credential envelope
//!
//! An envelope is the raw concatenation `nonce (12 bytes) || ciphertext+tag`.
//! Every seal draws a fresh nonce from the OS RNG, so the same credential set
//! never produces the same envelope twice under one key.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroizing;

use crate::credentials::CredentialSet;
use crate::error::{CredsyncError, CredsyncResult};

use super::SymmetricKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Sealed credential bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    bytes: Vec<u8>,
}

impl Envelope {
    fn new(nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        bytes.extend_from_slice(nonce);
        bytes.extend_from_slice(ciphertext);
        Self { bytes }
    }

    /// Wrap bytes read from disk. Validation happens when the envelope is opened.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The nonce prefix, if the envelope is long enough to hold one
    pub fn nonce(&self) -> Option<&[u8]> {
        self.bytes.get(..NONCE_SIZE)
    }

    /// Everything after the nonce
    pub fn ciphertext(&self) -> Option<&[u8]> {
        self.bytes.get(NONCE_SIZE..)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Seal arbitrary plaintext under the key
pub fn seal(plaintext: &[u8], key: &SymmetricKey) -> CredsyncResult<Envelope> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CredsyncError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CredsyncError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(Envelope::new(&nonce_bytes, &ciphertext))
}

/// Open an envelope, verifying its tag
///
/// Every failure, including an envelope too short to contain a nonce and a
/// tag, is reported as the same [`CredsyncError::Authentication`].
pub fn open(envelope: &Envelope, key: &SymmetricKey) -> CredsyncResult<Zeroizing<Vec<u8>>> {
    if envelope.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CredsyncError::Authentication);
    }

    let (nonce_bytes, ciphertext) = envelope.as_bytes().split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CredsyncError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CredsyncError::Authentication)?;

    Ok(Zeroizing::new(plaintext))
}

/// Serialize and seal a credential set
pub fn encode(key: &SymmetricKey, files: &CredentialSet) -> CredsyncResult<Envelope> {
    let document = Zeroizing::new(files.to_document()?);
    seal(&document, key)
}

/// Open an envelope and parse the credential set inside it
pub fn decode(key: &SymmetricKey, envelope: &Envelope) -> CredsyncResult<CredentialSet> {
    let plaintext = open(envelope, key)?;
    CredentialSet::from_document(&plaintext)
}
