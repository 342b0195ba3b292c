pub mod aead;
pub mod encrypted;
pub mod document;
pub mod error;
pub mod file;
pub mod preferences;
pub mod store_key;

pub use encrypted::EncryptedFileStore;
pub use error::{CryptoError, CryptoResult};
pub use preferences::PreferenceStore;

use passlock_core::config::{StoreBackend, StoreConfig};
use passlock_core::{SecretStore, StoreResult};
use std::path::Path;

pub const ENCRYPTED_FILE: &str = "passlock.enc";
pub const KEY_FILE: &str = "passlock.key";
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Open the backend selected by configuration, creating its directory if needed.
pub fn open_store(config: &StoreConfig) -> StoreResult<Box<dyn SecretStore>> {
    let dir = Path::new(&config.path);
    std::fs::create_dir_all(dir)?;
    match config.backend {
        StoreBackend::Encrypted => {
            let store = EncryptedFileStore::open(dir.join(ENCRYPTED_FILE), &dir.join(KEY_FILE))?;
            tracing::debug!("Opened encrypted store at {}", dir.display());
            Ok(Box::new(store))
        }
        StoreBackend::Preferences => {
            let store = PreferenceStore::open(dir.join(PREFERENCES_FILE));
            tracing::debug!("Opened preference store at {}", dir.display());
            Ok(Box::new(store))
        }
    }
}
