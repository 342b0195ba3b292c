//! Lock presentation state machine.
//!
//! The presenter decides, for each lifecycle event, whether the lock UI
//! should be shown or hidden, and keeps the expiry start time in the store
//! up to date. Events are handled one at a time, to completion.
//!
//! Store failures never abort a transition: they are logged and the
//! transition proceeds on in-memory state. Because a missing start time or
//! duration reads as "expired", a failed write can only cause an extra
//! prompt, never a skipped one.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::events::LifecycleEvent;
use crate::expiry;
use crate::store::SecretStore;
use crate::surface::{CoverTransition, LockId, PresentationSurface, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationState {
    Hidden,
    Presented,
}

impl std::fmt::Display for PresentationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hidden => f.write_str("hidden"),
            Self::Presented => f.write_str("presented"),
        }
    }
}

pub struct LockPresenter<S, P, C> {
    store: S,
    surface: P,
    clock: C,
    lock_id: LockId,
    state: PresentationState,
    /// True until the first `BecameActive` after process start.
    fresh_launch: bool,
    cover_transition: CoverTransition,
}

impl<S, P, C> LockPresenter<S, P, C>
where
    S: SecretStore,
    P: PresentationSurface,
    C: Clock,
{
    pub fn new(store: S, surface: P, clock: C) -> Self {
        Self {
            store,
            surface,
            clock,
            lock_id: LockId::new(),
            state: PresentationState::Hidden,
            fresh_launch: true,
            cover_transition: CoverTransition::default(),
        }
    }

    /// How the cover leaves after the lock UI has been shown.
    pub fn with_cover_transition(mut self, transition: CoverTransition) -> Self {
        self.cover_transition = transition;
        self
    }

    /// Process one lifecycle event and return the resulting state.
    pub fn handle(&mut self, event: LifecycleEvent) -> PresentationState {
        tracing::debug!(%event, state = %self.state, "Handling lifecycle event");
        match event {
            LifecycleEvent::EnteredBackground => self.entered_background(),
            LifecycleEvent::FinishedLaunching => self.present_if_needed(),
            LifecycleEvent::BecameActive => self.became_active(),
            LifecycleEvent::SecretAccepted => self.secret_accepted(),
        }
        self.state
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn is_presented(&self) -> bool {
        self.state == PresentationState::Presented
    }

    pub fn is_fresh_launch(&self) -> bool {
        self.fresh_launch
    }

    pub fn lock_id(&self) -> LockId {
        self.lock_id
    }

    /// Whether the grace period has lapsed as of now. `true` when expiry is disabled.
    pub fn is_expired(&self) -> bool {
        expiry::is_expired(
            self.clock.now(),
            self.store.get_expiry_start_time(),
            self.store.get_expiry_duration(),
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn entered_background(&mut self) {
        if self.store.has_expiry() {
            if self.is_presented() {
                // The prompt is already up: the grace clock must not start,
                // or it could lapse in the background and skip the prompt.
                if let Err(e) = self.store.delete_expiry_start_time() {
                    tracing::warn!("Failed to clear expiry start time: {e}");
                }
            } else {
                let now = self.clock.now();
                if let Err(e) = self.store.save_expiry_start_time(now) {
                    tracing::warn!("Failed to record expiry start time {now}: {e}");
                }
            }
        }

        self.surface.insert_cover();
        self.present_if_needed();
    }

    fn became_active(&mut self) {
        // At most one lock UI visible: another presenter's lock is authoritative.
        if let Some(Screen::Lock(id)) = self.surface.topmost_visible() {
            if id != self.lock_id {
                tracing::debug!(other = %id, "Another lock UI is on top, removing cover");
                self.surface.remove_cover(CoverTransition::Immediate);
            }
        }

        if !self.fresh_launch
            && self.is_presented()
            && self.store.has_expiry()
            && !self.is_expired()
        {
            tracing::info!(lock = %self.lock_id, "Within grace period, dismissing lock");
            self.state = PresentationState::Hidden;
            self.surface.dismiss(self.lock_id, false);
        }

        self.fresh_launch = false;
    }

    fn secret_accepted(&mut self) {
        if !self.is_presented() {
            tracing::debug!("Secret accepted while lock hidden, ignoring");
            return;
        }
        tracing::info!(lock = %self.lock_id, "Secret accepted, dismissing lock");
        self.state = PresentationState::Hidden;
        self.surface.dismiss(self.lock_id, true);
    }

    fn should_present(&self) -> bool {
        self.state == PresentationState::Hidden && self.store.has_secret()
    }

    /// Show the lock if a secret is configured and it is not already up.
    /// Always ends with the cover removed.
    fn present_if_needed(&mut self) {
        if !self.should_present() {
            self.surface.remove_cover(CoverTransition::Immediate);
            return;
        }

        match self.surface.topmost_visible() {
            Some(Screen::Lock(id)) if id == self.lock_id => {
                tracing::debug!(lock = %id, "Lock UI already on top, not presenting again");
                self.state = PresentationState::Presented;
                self.surface.remove_cover(CoverTransition::Immediate);
            }
            Some(Screen::Lock(other)) => {
                tracing::info!(other = %other, "Another lock UI is on top, not presenting");
                self.surface.remove_cover(CoverTransition::Immediate);
            }
            _ => {
                tracing::info!(lock = %self.lock_id, "Presenting lock");
                self.surface.show(self.lock_id);
                self.state = PresentationState::Presented;
                self.surface.remove_cover(self.cover_transition);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::{ManualClock, Timestamp};
    use crate::testing::{MemoryStore, RecordingSurface, SurfaceCall};

    use LifecycleEvent::*;
    use PresentationState::*;

    type TestPresenter = LockPresenter<MemoryStore, RecordingSurface, ManualClock>;

    fn presenter(store: MemoryStore) -> TestPresenter {
        LockPresenter::new(store, RecordingSurface::new(), ManualClock::new(Timestamp(0.0)))
    }

    fn at(p: &mut TestPresenter, secs: f64, event: LifecycleEvent) -> PresentationState {
        p.clock().set(Timestamp(secs));
        p.handle(event)
    }

    /// Presenter that has gone through launch, first activation, and unlock.
    fn unlocked(store: MemoryStore) -> TestPresenter {
        let mut p = presenter(store);
        at(&mut p, 0.0, FinishedLaunching);
        at(&mut p, 0.0, BecameActive);
        at(&mut p, 1.0, SecretAccepted);
        assert_eq!(p.state(), Hidden);
        p
    }

    #[test]
    fn starts_hidden_and_fresh() {
        let p = presenter(MemoryStore::with_secret("1234"));
        assert_eq!(p.state(), Hidden);
        assert!(p.is_fresh_launch());
    }

    #[test]
    fn no_secret_never_presents() {
        let mut p = presenter(MemoryStore::new());
        assert_eq!(p.handle(FinishedLaunching), Hidden);
        assert_eq!(p.handle(EnteredBackground), Hidden);
        assert_eq!(p.handle(BecameActive), Hidden);
        assert_eq!(p.surface().show_count(p.lock_id()), 0);
        assert!(!p.surface().has_cover());
    }

    #[test]
    fn launch_presents_without_touching_expiry() {
        let mut p = presenter(MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30)));
        assert_eq!(at(&mut p, 50.0, FinishedLaunching), Presented);
        assert_eq!(p.store().get_expiry_start_time(), None);
        assert!(p.surface().is_showing(p.lock_id()));
    }

    #[test]
    fn repeated_presentation_events_show_once() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        for event in [
            FinishedLaunching,
            EnteredBackground,
            EnteredBackground,
            FinishedLaunching,
            EnteredBackground,
        ] {
            assert_eq!(p.handle(event), Presented);
        }
        assert_eq!(p.surface().show_count(p.lock_id()), 1);
    }

    #[test]
    fn background_inserts_cover_before_show_and_always_removes_it() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        p.handle(EnteredBackground);
        let id = p.lock_id();
        assert_eq!(
            p.surface().calls,
            vec![
                SurfaceCall::InsertCover,
                SurfaceCall::Show(id),
                SurfaceCall::RemoveCover(CoverTransition::Immediate),
            ]
        );

        p.handle(EnteredBackground);
        assert_eq!(
            &p.surface().calls[3..],
            &[
                SurfaceCall::InsertCover,
                SurfaceCall::RemoveCover(CoverTransition::Immediate),
            ]
        );
        assert!(!p.surface().has_cover());
    }

    #[test]
    fn fade_transition_used_after_show() {
        let mut p = presenter(MemoryStore::with_secret("1234"))
            .with_cover_transition(CoverTransition::Fade);
        p.handle(EnteredBackground);
        assert_eq!(
            p.surface().calls.last(),
            Some(&SurfaceCall::RemoveCover(CoverTransition::Fade))
        );
    }

    #[test]
    fn background_records_start_time_when_hidden() {
        let mut p = unlocked(MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30)));
        at(&mut p, 100.0, EnteredBackground);
        assert_eq!(p.store().get_expiry_start_time(), Some(Timestamp(100.0)));
    }

    #[test]
    fn background_clears_start_time_when_already_presented() {
        let mut p = unlocked(MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30)));
        at(&mut p, 100.0, EnteredBackground);
        // Grace expired: lock stays up.
        assert_eq!(at(&mut p, 200.0, BecameActive), Presented);
        at(&mut p, 201.0, EnteredBackground);
        assert_eq!(p.store().get_expiry_start_time(), None);
        // Coming back quickly must still prompt.
        assert_eq!(at(&mut p, 202.0, BecameActive), Presented);
    }

    #[test]
    fn background_without_expiry_leaves_start_time_alone() {
        let mut p = unlocked(MemoryStore::with_secret("1234"));
        at(&mut p, 100.0, EnteredBackground);
        assert_eq!(p.store().get_expiry_start_time(), None);
    }

    #[test]
    fn grace_reentry_dismisses_without_secret() {
        let mut p = unlocked(MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30)));
        assert_eq!(at(&mut p, 100.0, EnteredBackground), Presented);
        assert_eq!(at(&mut p, 129.0, BecameActive), Hidden);
        assert_eq!(
            p.surface().calls.last(),
            Some(&SurfaceCall::Dismiss {
                lock: p.lock_id(),
                animated: false
            })
        );
    }

    #[test]
    fn grace_lapsed_keeps_lock() {
        let mut p = unlocked(MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30)));
        at(&mut p, 100.0, EnteredBackground);
        assert_eq!(at(&mut p, 130.0, BecameActive), Presented);
        assert!(p.is_expired());
    }

    #[test]
    fn no_expiry_configured_keeps_lock() {
        let mut p = unlocked(MemoryStore::with_secret("1234"));
        at(&mut p, 100.0, EnteredBackground);
        assert_eq!(at(&mut p, 100.5, BecameActive), Presented);
    }

    #[test]
    fn fresh_launch_suppresses_grace_shortcut() {
        let mut store = MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30));
        // Stale start time from the previous process run would otherwise count as in-grace.
        store.save_expiry_start_time(Timestamp(95.0)).unwrap();
        let mut p = presenter(store);
        at(&mut p, 100.0, FinishedLaunching);
        assert!(!p.is_expired());
        assert_eq!(at(&mut p, 100.0, BecameActive), Presented);
        assert!(!p.is_fresh_launch());
    }

    #[test]
    fn secret_accepted_dismisses_animated() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        p.handle(FinishedLaunching);
        assert_eq!(p.handle(SecretAccepted), Hidden);
        assert_eq!(
            p.surface().calls.last(),
            Some(&SurfaceCall::Dismiss {
                lock: p.lock_id(),
                animated: true
            })
        );
        assert!(!p.surface().is_showing(p.lock_id()));
    }

    #[test]
    fn secret_accepted_while_hidden_is_noop() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        assert_eq!(p.handle(SecretAccepted), Hidden);
        assert_eq!(p.surface().dismiss_count(), 0);
    }

    #[test]
    fn foreign_lock_on_top_blocks_presentation_and_drops_cover() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        let other = LockId::new();
        p.surface_mut().push_foreign_lock(other);
        assert_eq!(p.handle(EnteredBackground), Hidden);
        assert_eq!(p.surface().show_count(p.lock_id()), 0);
        assert!(!p.surface().has_cover());

        p.surface_mut().insert_cover();
        p.handle(BecameActive);
        assert!(!p.surface().has_cover());
    }

    #[test]
    fn own_lock_already_on_top_is_not_shown_twice() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        let id = p.lock_id();
        p.surface_mut().show(id);
        assert_eq!(p.handle(FinishedLaunching), Presented);
        assert_eq!(p.surface().show_count(id), 1);
    }

    #[test]
    fn own_lock_on_top_in_background_still_drops_cover() {
        let mut p = presenter(MemoryStore::with_secret("1234"));
        let id = p.lock_id();
        p.surface_mut().show(id);
        assert_eq!(p.handle(EnteredBackground), Presented);
        assert_eq!(p.surface().show_count(id), 1);
        assert!(!p.surface().has_cover());
        assert_eq!(
            p.surface().calls.last(),
            Some(&SurfaceCall::RemoveCover(CoverTransition::Immediate))
        );
    }

    #[test]
    fn write_failures_do_not_block_transitions() {
        let mut store = MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30));
        store.fail_writes = true;
        let mut p = unlocked(store);
        assert_eq!(at(&mut p, 100.0, EnteredBackground), Presented);
        // No start time was recorded, so the grace shortcut cannot apply.
        assert_eq!(at(&mut p, 101.0, BecameActive), Presented);
        assert_eq!(at(&mut p, 102.0, SecretAccepted), Hidden);
    }

    #[test]
    fn read_failures_never_grace_dismiss() {
        let store = MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30));
        let mut p = unlocked(store);
        at(&mut p, 100.0, EnteredBackground);
        p.store_mut().fail_reads = true;
        assert_eq!(at(&mut p, 101.0, BecameActive), Presented);
    }

    #[test]
    fn unlock_scenario() {
        let mut p = unlocked(MemoryStore::with_secret("1234").with_expiry(Duration::from_secs(30)));

        assert_eq!(at(&mut p, 100.0, EnteredBackground), Presented);
        assert_eq!(p.store().get_expiry_start_time(), Some(Timestamp(100.0)));

        assert_eq!(at(&mut p, 120.0, BecameActive), Hidden);

        assert_eq!(at(&mut p, 200.0, EnteredBackground), Presented);
        assert_eq!(p.store().get_expiry_start_time(), Some(Timestamp(200.0)));

        assert_eq!(at(&mut p, 235.0, BecameActive), Presented);
        assert_eq!(p.handle(SecretAccepted), Hidden);
        assert_eq!(p.surface().show_count(p.lock_id()), 3);
    }
}
