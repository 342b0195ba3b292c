//! Narrow contract between the presenter and whatever UI toolkit hosts it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one lock-UI instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockId(Uuid);

impl LockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lock:{}", self.0)
    }
}

/// What the surface reports as the topmost visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Host application content.
    Content,
    /// A lock UI instance, possibly owned by another presenter.
    Lock(LockId),
}

/// How the blocking cover leaves once the lock UI is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverTransition {
    /// Remove as soon as the lock UI is shown.
    #[default]
    Immediate,
    /// Fade out, then remove.
    Fade,
}

pub trait PresentationSurface {
    /// Put an opaque cover over the app so its content is not exposed.
    fn insert_cover(&mut self);

    /// Take the cover away. Must complete even if nothing was shown under it.
    fn remove_cover(&mut self, transition: CoverTransition);

    /// Show the lock UI on top of the topmost visible screen.
    fn show(&mut self, lock: LockId);

    fn dismiss(&mut self, lock: LockId, animated: bool);

    /// `None` when the host has no window yet.
    fn topmost_visible(&self) -> Option<Screen>;
}

impl<P: PresentationSurface + ?Sized> PresentationSurface for Box<P> {
    fn insert_cover(&mut self) {
        (**self).insert_cover()
    }
    fn remove_cover(&mut self, transition: CoverTransition) {
        (**self).remove_cover(transition)
    }
    fn show(&mut self, lock: LockId) {
        (**self).show(lock)
    }
    fn dismiss(&mut self, lock: LockId, animated: bool) {
        (**self).dismiss(lock, animated)
    }
    fn topmost_visible(&self) -> Option<Screen> {
        (**self).topmost_visible()
    }
}
