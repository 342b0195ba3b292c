//! The logical contents shared by both file backends, and the one
//! `SecretStore` implementation they both go through.
//!
//! A backend only decides how the [`Document`] is encoded on disk
//! ([`DocumentCodec`]); save/update/delete semantics live here so every
//! backend behaves identically.

use std::time::Duration;

use passlock_core::store::{
    format_duration, format_timestamp, parse_duration, parse_timestamp, EXPIRY_DURATION_KEY,
    EXPIRY_START_TIME_KEY, SECRET_KEY,
};
use passlock_core::{Secret, SecretStore, StoreError, StoreResult, Timestamp};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Every persisted value, each independently present or absent.
/// Numbers are stored stringified.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Document {
    #[serde(rename = "passlock.secret", default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<Vec<String>>,
    #[serde(
        rename = "passlock.expiry_duration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_duration: Option<String>,
    #[serde(
        rename = "passlock.expiry_start_time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_start_time: Option<String>,
}

/// On-disk encoding of a [`Document`].
pub trait DocumentCodec {
    /// Load the current document. A missing file is an empty document.
    fn load(&self) -> StoreResult<Document>;

    /// Replace the stored document. Must not leave a partially written file.
    fn persist(&self, doc: &Document) -> StoreResult<()>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Secret,
    ExpiryDuration,
    ExpiryStartTime,
}

impl Field {
    fn key(self) -> &'static str {
        match self {
            Field::Secret => SECRET_KEY,
            Field::ExpiryDuration => EXPIRY_DURATION_KEY,
            Field::ExpiryStartTime => EXPIRY_START_TIME_KEY,
        }
    }

    fn is_set(self, doc: &Document) -> bool {
        match self {
            Field::Secret => doc.secret.is_some(),
            Field::ExpiryDuration => doc.expiry_duration.is_some(),
            Field::ExpiryStartTime => doc.expiry_start_time.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Upsert,
    Replace,
}

/// File-backed [`SecretStore`] parameterized by its encoding.
#[derive(Debug)]
pub struct FileStore<C> {
    codec: C,
}

impl<C: DocumentCodec> FileStore<C> {
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Current document, or an empty one if it cannot be read.
    fn read(&self) -> Document {
        self.codec.load().unwrap_or_else(|e| {
            tracing::warn!("Reading {} failed, treating as empty: {e}", self.codec.describe());
            Document::default()
        })
    }

    fn modify(
        &mut self,
        field: Field,
        mode: WriteMode,
        apply: impl FnOnce(&mut Document),
    ) -> StoreResult<()> {
        let mut doc = self.codec.load().map_err(|e| {
            StoreError::write_failed(field.key(), format!("existing store unreadable: {e}"))
        })?;
        if mode == WriteMode::Replace && !field.is_set(&doc) {
            return Err(StoreError::write_failed(
                field.key(),
                "no existing value to update",
            ));
        }
        apply(&mut doc);
        self.codec
            .persist(&doc)
            .map_err(|e| StoreError::write_failed(field.key(), e.to_string()))
    }
}

impl<C: DocumentCodec> SecretStore for FileStore<C> {
    fn save_secret(&mut self, secret: &Secret) -> StoreResult<()> {
        self.modify(Field::Secret, WriteMode::Upsert, |doc| {
            doc.secret = Some(secret.symbols().to_vec());
        })
    }

    fn update_secret(&mut self, secret: &Secret) -> StoreResult<()> {
        self.modify(Field::Secret, WriteMode::Replace, |doc| {
            doc.secret = Some(secret.symbols().to_vec());
        })
    }

    fn delete_secret(&mut self) -> StoreResult<()> {
        self.modify(Field::Secret, WriteMode::Upsert, |doc| {
            if let Some(mut old) = doc.secret.take() {
                old.zeroize();
            }
        })
    }

    fn get_secret(&self) -> Secret {
        self.read()
            .secret
            .clone()
            .map(Secret::new)
            .unwrap_or_default()
    }

    fn save_expiry_duration(&mut self, duration: Duration) -> StoreResult<()> {
        self.modify(Field::ExpiryDuration, WriteMode::Upsert, |doc| {
            doc.expiry_duration = Some(format_duration(duration));
        })
    }

    fn update_expiry_duration(&mut self, duration: Duration) -> StoreResult<()> {
        self.modify(Field::ExpiryDuration, WriteMode::Replace, |doc| {
            doc.expiry_duration = Some(format_duration(duration));
        })
    }

    fn delete_expiry_duration(&mut self) -> StoreResult<()> {
        self.modify(Field::ExpiryDuration, WriteMode::Upsert, |doc| {
            doc.expiry_duration = None;
        })
    }

    fn get_expiry_duration(&self) -> Option<Duration> {
        let raw = self.read().expiry_duration.clone()?;
        let parsed = parse_duration(&raw);
        if parsed.is_none() {
            tracing::warn!("Ignoring undecodable {EXPIRY_DURATION_KEY} value {raw:?}");
        }
        parsed
    }

    fn save_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()> {
        self.modify(Field::ExpiryStartTime, WriteMode::Upsert, |doc| {
            doc.expiry_start_time = Some(format_timestamp(time));
        })
    }

    fn update_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()> {
        self.modify(Field::ExpiryStartTime, WriteMode::Replace, |doc| {
            doc.expiry_start_time = Some(format_timestamp(time));
        })
    }

    fn delete_expiry_start_time(&mut self) -> StoreResult<()> {
        self.modify(Field::ExpiryStartTime, WriteMode::Upsert, |doc| {
            doc.expiry_start_time = None;
        })
    }

    fn get_expiry_start_time(&self) -> Option<Timestamp> {
        let raw = self.read().expiry_start_time.clone()?;
        let parsed = parse_timestamp(&raw);
        if parsed.is_none() {
            tracing::warn!("Ignoring undecodable {EXPIRY_START_TIME_KEY} value {raw:?}");
        }
        parsed
    }
}
