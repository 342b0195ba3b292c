//! In-memory test doubles for the store and the presentation surface.

use std::time::Duration;

use crate::clock::Timestamp;
use crate::error::{StoreError, StoreResult};
use crate::secret::Secret;
use crate::store::{SecretStore, EXPIRY_DURATION_KEY, EXPIRY_START_TIME_KEY, SECRET_KEY};
use crate::surface::{CoverTransition, LockId, PresentationSurface, Screen};

/// In-memory SecretStore with switchable failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secret: Option<Secret>,
    duration: Option<Duration>,
    start_time: Option<Timestamp>,
    /// When set, every write returns `WriteFailed` and changes nothing.
    pub fail_writes: bool,
    /// When set, only writes to this key fail.
    pub fail_key: Option<&'static str>,
    /// When set, every read behaves as if the value were absent.
    pub fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: secret.parse().ok(),
            ..Self::default()
        }
    }

    pub fn with_expiry(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    fn write<T>(
        &self,
        key: &str,
        slot: &mut Option<T>,
        value: Option<T>,
        must_exist: bool,
    ) -> StoreResult<()> {
        if self.fail_writes || self.fail_key == Some(key) {
            return Err(StoreError::write_failed(key, "injected failure"));
        }
        if must_exist && slot.is_none() {
            return Err(StoreError::write_failed(key, "no existing value to update"));
        }
        *slot = value;
        Ok(())
    }
}

impl SecretStore for MemoryStore {
    fn save_secret(&mut self, secret: &Secret) -> StoreResult<()> {
        let mut slot = self.secret.take();
        let result = self.write(SECRET_KEY, &mut slot, Some(secret.clone()), false);
        self.secret = slot;
        result
    }

    fn update_secret(&mut self, secret: &Secret) -> StoreResult<()> {
        let mut slot = self.secret.take();
        let result = self.write(SECRET_KEY, &mut slot, Some(secret.clone()), true);
        self.secret = slot;
        result
    }

    fn delete_secret(&mut self) -> StoreResult<()> {
        let mut slot = self.secret.take();
        let result = self.write(SECRET_KEY, &mut slot, None, false);
        self.secret = slot;
        result
    }

    fn get_secret(&self) -> Secret {
        if self.fail_reads {
            return Secret::empty();
        }
        self.secret.clone().unwrap_or_default()
    }

    fn save_expiry_duration(&mut self, duration: Duration) -> StoreResult<()> {
        let mut slot = self.duration;
        self.write(EXPIRY_DURATION_KEY, &mut slot, Some(duration), false)?;
        self.duration = slot;
        Ok(())
    }

    fn update_expiry_duration(&mut self, duration: Duration) -> StoreResult<()> {
        let mut slot = self.duration;
        self.write(EXPIRY_DURATION_KEY, &mut slot, Some(duration), true)?;
        self.duration = slot;
        Ok(())
    }

    fn delete_expiry_duration(&mut self) -> StoreResult<()> {
        let mut slot = self.duration;
        self.write(EXPIRY_DURATION_KEY, &mut slot, None, false)?;
        self.duration = slot;
        Ok(())
    }

    fn get_expiry_duration(&self) -> Option<Duration> {
        if self.fail_reads {
            return None;
        }
        self.duration
    }

    fn save_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()> {
        let mut slot = self.start_time;
        self.write(EXPIRY_START_TIME_KEY, &mut slot, Some(time), false)?;
        self.start_time = slot;
        Ok(())
    }

    fn update_expiry_start_time(&mut self, time: Timestamp) -> StoreResult<()> {
        let mut slot = self.start_time;
        self.write(EXPIRY_START_TIME_KEY, &mut slot, Some(time), true)?;
        self.start_time = slot;
        Ok(())
    }

    fn delete_expiry_start_time(&mut self) -> StoreResult<()> {
        let mut slot = self.start_time;
        self.write(EXPIRY_START_TIME_KEY, &mut slot, None, false)?;
        self.start_time = slot;
        Ok(())
    }

    fn get_expiry_start_time(&self) -> Option<Timestamp> {
        if self.fail_reads {
            return None;
        }
        self.start_time
    }
}

/// One instruction the presenter gave the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    InsertCover,
    RemoveCover(CoverTransition),
    Show(LockId),
    Dismiss { lock: LockId, animated: bool },
}

/// Surface that keeps a screen stack and records every call it receives.
#[derive(Debug)]
pub struct RecordingSurface {
    stack: Vec<Screen>,
    cover: bool,
    pub calls: Vec<SurfaceCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Content],
            cover: false,
            calls: Vec::new(),
        }
    }

    /// Simulate a lock UI owned by somebody else landing on top.
    pub fn push_foreign_lock(&mut self, lock: LockId) {
        self.stack.push(Screen::Lock(lock));
    }

    pub fn has_cover(&self) -> bool {
        self.cover
    }

    pub fn show_count(&self, lock: LockId) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == SurfaceCall::Show(lock))
            .count()
    }

    pub fn dismiss_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Dismiss { .. }))
            .count()
    }

    pub fn is_showing(&self, lock: LockId) -> bool {
        self.stack.contains(&Screen::Lock(lock))
    }
}

impl PresentationSurface for RecordingSurface {
    fn insert_cover(&mut self) {
        self.cover = true;
        self.calls.push(SurfaceCall::InsertCover);
    }

    fn remove_cover(&mut self, transition: CoverTransition) {
        self.cover = false;
        self.calls.push(SurfaceCall::RemoveCover(transition));
    }

    fn show(&mut self, lock: LockId) {
        self.stack.push(Screen::Lock(lock));
        self.calls.push(SurfaceCall::Show(lock));
    }

    fn dismiss(&mut self, lock: LockId, animated: bool) {
        self.stack.retain(|s| *s != Screen::Lock(lock));
        self.calls.push(SurfaceCall::Dismiss { lock, animated });
    }

    fn topmost_visible(&self) -> Option<Screen> {
        self.stack.last().copied()
    }
}
