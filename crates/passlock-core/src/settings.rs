//! Host-facing secret and expiry management over any [`SecretStore`].

use std::time::Duration;

use serde::Serialize;

use crate::error::SettingsError;
use crate::secret::Secret;
use crate::store::SecretStore;

/// Snapshot of what is configured, safe to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockStatus {
    pub has_secret: bool,
    pub secret_length: usize,
    pub expiry_secs: Option<f64>,
}

pub struct LockSettings<'a, S: SecretStore + ?Sized> {
    store: &'a mut S,
    secret_length: usize,
}

impl<'a, S: SecretStore + ?Sized> LockSettings<'a, S> {
    pub fn new(store: &'a mut S, secret_length: usize) -> Self {
        Self {
            store,
            secret_length,
        }
    }

    /// Store a new secret, replacing any existing one.
    pub fn set_secret(&mut self, secret: &Secret) -> Result<(), SettingsError> {
        if secret.is_empty() {
            return Err(SettingsError::Empty);
        }
        if secret.len() != self.secret_length {
            return Err(SettingsError::InvalidLength {
                expected: self.secret_length,
                got: secret.len(),
            });
        }
        if self.store.has_secret() {
            self.store.update_secret(secret)?;
        } else {
            self.store.save_secret(secret)?;
        }
        tracing::info!("Secret configured ({} symbols)", secret.len());
        Ok(())
    }

    /// Turn the lock off entirely: secret, expiry duration, and start time.
    ///
    /// The three deletes are not atomic. The secret goes last, so a failure
    /// part way leaves the lock enabled rather than leaving expiry behind.
    pub fn remove_secret(&mut self) -> Result<(), SettingsError> {
        self.store.delete_expiry_start_time()?;
        self.store.delete_expiry_duration()?;
        self.store.delete_secret()?;
        tracing::info!("Secret removed");
        Ok(())
    }

    /// Set the grace period. Any pending start time is discarded.
    pub fn set_expiry(&mut self, duration: Duration) -> Result<(), SettingsError> {
        if self.store.has_expiry() {
            self.store.update_expiry_duration(duration)?;
        } else {
            self.store.save_expiry_duration(duration)?;
        }
        self.store.delete_expiry_start_time()?;
        tracing::info!("Expiry set to {:.1}s", duration.as_secs_f64());
        Ok(())
    }

    pub fn disable_expiry(&mut self) -> Result<(), SettingsError> {
        self.store.delete_expiry_duration()?;
        self.store.delete_expiry_start_time()?;
        tracing::info!("Expiry disabled");
        Ok(())
    }

    /// `false` when no secret is configured.
    pub fn verify(&self, candidate: &Secret) -> bool {
        let stored = self.store.get_secret();
        !stored.is_empty() && stored.matches(candidate)
    }

    pub fn status(&self) -> LockStatus {
        let secret = self.store.get_secret();
        LockStatus {
            has_secret: !secret.is_empty(),
            secret_length: secret.len(),
            expiry_secs: self.store.get_expiry_duration().map(|d| d.as_secs_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Timestamp;
    use crate::error::StoreError;
    use crate::store::SECRET_KEY;
    use crate::testing::MemoryStore;

    fn secret(s: &str) -> Secret {
        s.parse().unwrap()
    }

    #[test]
    fn set_secret_then_verify() {
        let mut store = MemoryStore::new();
        let mut settings = LockSettings::new(&mut store, 4);
        settings.set_secret(&secret("1234")).unwrap();
        assert!(settings.verify(&secret("1234")));
        assert!(!settings.verify(&secret("1235")));
        assert!(!settings.verify(&secret("123")));
    }

    #[test]
    fn set_secret_replaces_existing() {
        let mut store = MemoryStore::with_secret("1111");
        let mut settings = LockSettings::new(&mut store, 4);
        settings.set_secret(&secret("2222")).unwrap();
        assert!(settings.verify(&secret("2222")));
        assert!(!settings.verify(&secret("1111")));
    }

    #[test]
    fn set_secret_rejects_wrong_length() {
        let mut store = MemoryStore::new();
        let mut settings = LockSettings::new(&mut store, 4);
        let err = settings.set_secret(&secret("12345")).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidLength {
                expected: 4,
                got: 5
            }
        ));
        assert!(matches!(
            settings.set_secret(&Secret::empty()),
            Err(SettingsError::Empty)
        ));
        assert!(!store.has_secret());
    }

    #[test]
    fn verify_without_secret_rejects() {
        let mut store = MemoryStore::new();
        let settings = LockSettings::new(&mut store, 4);
        assert!(!settings.verify(&Secret::empty()));
    }

    #[test]
    fn set_expiry_clears_start_time() {
        let mut store = MemoryStore::with_secret("1234");
        store.save_expiry_start_time(Timestamp(10.0)).unwrap();
        {
            let mut settings = LockSettings::new(&mut store, 4);
            settings.set_expiry(Duration::from_secs(30)).unwrap();
            settings.set_expiry(Duration::from_secs(60)).unwrap();
        }
        assert_eq!(store.get_expiry_duration(), Some(Duration::from_secs(60)));
        assert_eq!(store.get_expiry_start_time(), None);
    }

    #[test]
    fn remove_secret_clears_everything() {
        let mut store = MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30));
        store.save_expiry_start_time(Timestamp(10.0)).unwrap();
        LockSettings::new(&mut store, 4).remove_secret().unwrap();
        assert!(!store.has_secret());
        assert!(!store.has_expiry());
        assert_eq!(store.get_expiry_start_time(), None);
    }

    #[test]
    fn remove_secret_failure_keeps_lock_enabled() {
        let mut store = MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30));
        store.fail_key = Some(SECRET_KEY);
        let err = LockSettings::new(&mut store, 4).remove_secret().unwrap_err();
        assert!(matches!(err, SettingsError::Store(StoreError::WriteFailed { .. })));
        assert!(store.has_secret());
        assert!(!store.has_expiry());
    }

    #[test]
    fn disable_expiry_keeps_secret() {
        let mut store = MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30));
        LockSettings::new(&mut store, 4).disable_expiry().unwrap();
        assert!(store.has_secret());
        assert!(!store.has_expiry());
    }

    #[test]
    fn store_failure_is_reported() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        let mut settings = LockSettings::new(&mut store, 4);
        assert!(matches!(
            settings.set_secret(&secret("1234")),
            Err(SettingsError::Store(_))
        ));
    }

    #[test]
    fn status_reports_configuration() {
        let mut store = MemoryStore::with_secret("1234").with_expiry(Duration::from_millis(2500));
        let status = LockSettings::new(&mut store, 4).status();
        assert_eq!(
            status,
            LockStatus {
                has_secret: true,
                secret_length: 4,
                expiry_secs: Some(2.5),
            }
        );
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"has_secret\":true"));
    }
}
