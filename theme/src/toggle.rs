//! Toggle control with bounded self-correction.
//!
//! DESIGN
//! ======
//! Any number of controls may be mounted at once without a shared owner.
//! Each activation flips the live projection, persists the new value, and
//! publishes a commit on the bus. A deferred verification then re-reads the
//! projection:
//!
//! - a newer commit exists (from this or another control): stand down, the
//!   most recent user action wins;
//! - projection matches the commit: done;
//! - projection drifted: force it back and republish, then verify again,
//!   up to `max_verifications` passes in total. After the last failed pass
//!   the control logs a diagnostic and returns to `Idle` regardless.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::Theme;
use crate::bus::{CommitId, ThemeBus};
use crate::projection::ThemeProjection;
use crate::schedule::Scheduler;
use crate::store::PreferenceStore;

#[cfg(test)]
#[path = "toggle_test.rs"]
mod toggle_test;

/// Reconciliation state of a single control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleState {
    #[default]
    Idle,
    /// Writing store + projection and publishing.
    Committing,
    /// A verification pass is scheduled; `pass` counts from 1.
    Verifying { pass: u8 },
}

#[derive(Default)]
struct Machine {
    state: ToggleState,
    intended: Option<Theme>,
    commit: Option<CommitId>,
}

struct ToggleInner {
    store: Arc<PreferenceStore>,
    projection: Arc<dyn ThemeProjection>,
    bus: ThemeBus,
    scheduler: Arc<dyn Scheduler>,
    max_verifications: u8,
    machine: Mutex<Machine>,
}

/// User affordance that flips the theme. Clones share one state machine.
#[derive(Clone)]
pub struct ToggleControl {
    inner: Arc<ToggleInner>,
}

impl ToggleControl {
    pub fn new(
        store: Arc<PreferenceStore>,
        projection: Arc<dyn ThemeProjection>,
        bus: ThemeBus,
        scheduler: Arc<dyn Scheduler>,
        max_verifications: u8,
    ) -> Self {
        Self {
            inner: Arc::new(ToggleInner {
                store,
                projection,
                bus,
                scheduler,
                max_verifications: max_verifications.max(1),
                machine: Mutex::new(Machine::default()),
            }),
        }
    }

    /// Flip the theme in response to user activation. Returns the new theme.
    ///
    /// Accepted in any state: a newer activation supersedes a pending
    /// verification.
    pub fn activate(&self) -> Theme {
        let next = Theme::from_dark(self.inner.projection.is_dark()).flipped();
        self.lock().state = ToggleState::Committing;

        self.inner.store.set(next);
        self.inner.projection.set_dark(next.is_dark());
        let commit = self.inner.bus.publish(next.is_dark());
        log::debug!("theme toggled to {next:?} ({commit:?})");

        {
            let mut machine = self.lock();
            machine.intended = Some(next);
            machine.commit = Some(commit);
            machine.state = ToggleState::Verifying { pass: 1 };
        }
        self.schedule_verification(commit, 1);
        next
    }

    #[must_use]
    pub fn state(&self) -> ToggleState {
        self.lock().state
    }

    /// Theme of this control's latest commit, if any.
    #[must_use]
    pub fn intended(&self) -> Option<Theme> {
        self.lock().intended
    }

    fn schedule_verification(&self, commit: CommitId, pass: u8) {
        // Weak so a queued check never keeps an unmounted control alive.
        let control = Arc::downgrade(&self.inner);
        self.inner.scheduler.defer(Box::new(move || verify(&control, commit, pass)));
    }

    fn run_verification(&self, commit: CommitId, pass: u8) {
        let intended = {
            let machine = self.lock();
            if machine.commit != Some(commit) {
                return;
            }
            machine.intended
        };
        let Some(intended) = intended else {
            return;
        };

        if self.inner.bus.latest_commit() != commit {
            log::debug!("theme commit {commit:?} superseded, standing down");
            self.finish();
            return;
        }

        if self.inner.projection.is_dark() == intended.is_dark() {
            self.finish();
            return;
        }

        if pass >= self.inner.max_verifications {
            log::warn!(
                "theme projection still diverges after {pass} verification(s); stored preference stays {intended:?}"
            );
            self.finish();
            return;
        }

        log::info!("theme projection overwritten externally, forcing {intended:?}");
        self.inner.projection.set_dark(intended.is_dark());
        self.inner.bus.republish(intended.is_dark());
        self.lock().state = ToggleState::Verifying { pass: pass + 1 };
        self.schedule_verification(commit, pass + 1);
    }

    fn finish(&self) {
        self.lock().state = ToggleState::Idle;
    }

    fn lock(&self) -> MutexGuard<'_, Machine> {
        self.inner.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn verify(control: &Weak<ToggleInner>, commit: CommitId, pass: u8) {
    if let Some(inner) = control.upgrade() {
        ToggleControl { inner }.run_verification(commit, pass);
    }
}
