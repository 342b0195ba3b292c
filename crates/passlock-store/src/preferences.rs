//! Plain preference store: a TOML file of named values, unencrypted.

use std::path::{Path, PathBuf};

use passlock_core::{StoreError, StoreResult};

use crate::document::{Document, DocumentCodec, FileStore};
use crate::file;

#[derive(Debug)]
pub struct TomlCodec {
    path: PathBuf,
}

impl DocumentCodec for TomlCodec {
    fn load(&self) -> StoreResult<Document> {
        let Some(bytes) = file::read_optional(&self.path)? else {
            return Ok(Document::default());
        };
        let text = String::from_utf8(bytes)
            .map_err(|e| StoreError::read_failed(&self.describe(), e.to_string()))?;
        toml::from_str(&text).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn persist(&self, doc: &Document) -> StoreResult<()> {
        let text = toml::to_string(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        file::write_atomic(&self.path, text.as_bytes())?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("preference store {}", self.path.display())
    }
}

pub type PreferenceStore = FileStore<TomlCodec>;

impl FileStore<TomlCodec> {
    /// The file is created on first write.
    pub fn open(path: PathBuf) -> Self {
        Self::with_codec(TomlCodec { path })
    }

    pub fn path(&self) -> &Path {
        &self.codec().path
    }
}
