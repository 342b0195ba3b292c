pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod expiry;
pub mod lifecycle;
pub mod presenter;
pub mod secret;
pub mod settings;
pub mod store;
pub mod surface;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use error::{SettingsError, StoreError, StoreResult};
pub use events::LifecycleEvent;
pub use presenter::{LockPresenter, PresentationState};
pub use secret::Secret;
pub use store::SecretStore;
pub use surface::{CoverTransition, LockId, PresentationSurface, Screen};
