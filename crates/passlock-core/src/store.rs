//! Secret-store contract consumed by the presenter and the settings layer.
//!
//! Every backend follows the same write semantics:
//! - `save_*` creates or replaces the value.
//! - `update_*` replaces an existing value and fails with
//!   [`StoreError::WriteFailed`] when it is absent.
//! - `delete_*` of an absent value succeeds.
//! - A failed write leaves the previously stored value untouched.
//!
//! Reads never fail: absence, I/O errors and undecodable values all come
//! back as empty/`None`, and the backend logs what went wrong.
//!
//! [`StoreError::WriteFailed`]: crate::error::StoreError::WriteFailed

use std::time::Duration;

use crate::clock::Timestamp;
use crate::error::StoreResult;
use crate::secret::Secret;

pub const SECRET_KEY: &str = "passlock.secret";
pub const EXPIRY_DURATION_KEY: &str = "passlock.expiry_duration";
pub const EXPIRY_START_TIME_KEY: &str = "passlock.expiry_start_time";

pub trait SecretStore {
    // -- Secret ---

    fn save_secret(&mut self, secret: &Secret) -> StoreResult<()>;
    fn update_secret(&mut self, secret: &Secret) -> StoreResult<()>;
    fn delete_secret(&mut self) -> StoreResult<()>;
    fn get_secret(&self) -> Secret;

    // -- Expiry duration ---

    fn save_expiry_duration(&mut self, duration: Duration) -> StoreResult<()>;
    fn update_expiry_duration(&mut self, duration: Duration) -> StoreResult<()>;
    fn delete_expiry_duration(&mut self) -> StoreResult<()>;
    fn get_expiry_duration(&self) -> Option<Duration>;

    // -- Expiry start time ---

    fn save_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()>;
    fn update_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()>;
    fn delete_expiry_start_time(&mut self) -> StoreResult<()>;
    fn get_expiry_start_time(&self) -> Option<Timestamp>;

    fn has_secret(&self) -> bool {
        !self.get_secret().is_empty()
    }

    fn has_expiry(&self) -> bool {
        self.get_expiry_duration().is_some()
    }
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn save_secret(&mut self, secret: &Secret) -> StoreResult<()> {
        (**self).save_secret(secret)
    }
    fn update_secret(&mut self, secret: &Secret) -> StoreResult<()> {
        (**self).update_secret(secret)
    }
    fn delete_secret(&mut self) -> StoreResult<()> {
        (**self).delete_secret()
    }
    fn get_secret(&self) -> Secret {
        (**self).get_secret()
    }

    fn save_expiry_duration(&mut self, duration: Duration) -> StoreResult<()> {
        (**self).save_expiry_duration(duration)
    }
    fn update_expiry_duration(&mut self, duration: Duration) -> StoreResult<()> {
        (**self).update_expiry_duration(duration)
    }
    fn delete_expiry_duration(&mut self) -> StoreResult<()> {
        (**self).delete_expiry_duration()
    }
    fn get_expiry_duration(&self) -> Option<Duration> {
        (**self).get_expiry_duration()
    }

    fn save_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()> {
        (**self).save_expiry_start_time(time)
    }
    fn update_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()> {
        (**self).update_expiry_start_time(time)
    }
    fn delete_expiry_start_time(&mut self) -> StoreResult<()> {
        (**self).delete_expiry_start_time()
    }
    fn get_expiry_start_time(&self) -> Option<Timestamp> {
        (**self).get_expiry_start_time()
    }
}

/// Decode a stringified duration (seconds). Negative, non-finite or
/// unparsable input yields `None`.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let secs: f64 = raw.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

/// Decode a stringified timestamp (seconds). Non-finite or unparsable input yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let secs: f64 = raw.trim().parse().ok()?;
    secs.is_finite().then_some(Timestamp(secs))
}

pub fn format_duration(duration: Duration) -> String {
    duration.as_secs_f64().to_string()
}

pub fn format_timestamp(time: Timestamp) -> String {
    time.as_secs().to_string()
}
