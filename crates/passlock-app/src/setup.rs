use anyhow::{Context, Result};
use passlock_core::config::AppConfig;
use passlock_core::SecretStore;

pub fn open_store(config: &AppConfig) -> Result<Box<dyn SecretStore>> {
    passlock_store::open_store(&config.store).with_context(|| {
        format!(
            "opening {:?} store at {}",
            config.store.backend, config.store.path
        )
    })
}
