//! Durable store encrypted at rest.
//!
//! File format: `nonce (24 bytes) || XChaCha20-Poly1305(JSON document)`.
//! The key is derived from a random install secret kept in a separate
//! owner-only key file.

use std::path::{Path, PathBuf};

use passlock_core::{StoreError, StoreResult};
use zeroize::Zeroize;

use crate::aead;
use crate::document::{Document, DocumentCodec, FileStore};
use crate::file;
use crate::store_key::{InstallSecret, StoreKey};

#[derive(Debug)]
pub struct EncryptedCodec {
    path: PathBuf,
    key: StoreKey,
}

impl DocumentCodec for EncryptedCodec {
    fn load(&self) -> StoreResult<Document> {
        let Some(frame) = file::read_optional(&self.path)? else {
            return Ok(Document::default());
        };
        let mut plaintext = aead::open(&frame, self.key.as_bytes())?;
        let parsed = serde_json::from_slice(&plaintext)
            .map_err(|e| StoreError::Serialization(e.to_string()));
        plaintext.zeroize();
        parsed
    }

    fn persist(&self, doc: &Document) -> StoreResult<()> {
        let mut json =
            serde_json::to_vec(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let sealed = aead::seal(&json, self.key.as_bytes());
        json.zeroize();
        file::write_atomic(&self.path, &sealed?)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("encrypted store {}", self.path.display())
    }
}

pub type EncryptedFileStore = FileStore<EncryptedCodec>;

impl FileStore<EncryptedCodec> {
    /// Open (or lazily create) the store at `path`, keyed by the install
    /// secret in `key_path`. The key file is generated on first use.
    pub fn open(path: PathBuf, key_path: &Path) -> StoreResult<Self> {
        let secret = InstallSecret::load_or_create(key_path)?;
        let key = StoreKey::derive(&secret)?;
        Ok(Self::with_codec(EncryptedCodec { path, key }))
    }

    /// Open with an explicit key, bypassing the key file.
    pub fn with_key(path: PathBuf, key: StoreKey) -> Self {
        Self::with_codec(EncryptedCodec { path, key })
    }

    pub fn path(&self) -> &Path {
        &self.codec().path
    }
}
