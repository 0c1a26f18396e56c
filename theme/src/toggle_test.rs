use std::sync::Mutex;

use super::*;
use crate::bus::{ChangeOrigin, ThemeChange};
use crate::projection::MemoryProjection;
use crate::schedule::ManualScheduler;
use crate::store::{FixedScheme, MemoryBackend};
use crate::{DEFAULT_MAX_VERIFICATIONS, DEFAULT_STORAGE_KEY};

struct Fixture {
    store: Arc<PreferenceStore>,
    projection: Arc<MemoryProjection>,
    bus: ThemeBus,
    scheduler: Arc<ManualScheduler>,
    changes: Arc<Mutex<Vec<ThemeChange>>>,
}

impl Fixture {
    fn new(dark: bool) -> Self {
        let store = Arc::new(PreferenceStore::new(
            Arc::new(MemoryBackend::new()),
            Arc::new(FixedScheme::new(dark)),
            DEFAULT_STORAGE_KEY,
        ));
        let projection = Arc::new(MemoryProjection::new(dark));
        let bus = ThemeBus::new(projection.clone());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        bus.subscribe(move |change: &ThemeChange| {
            sink.lock().unwrap().push(*change);
            Ok(())
        });
        Self { store, projection, bus, scheduler: Arc::new(ManualScheduler::new()), changes }
    }

    fn control(&self) -> ToggleControl {
        ToggleControl::new(
            self.store.clone(),
            self.projection.clone(),
            self.bus.clone(),
            self.scheduler.clone(),
            DEFAULT_MAX_VERIFICATIONS,
        )
    }

    fn origins(&self) -> Vec<ChangeOrigin> {
        self.changes.lock().unwrap().iter().map(|c| c.origin).collect()
    }
}

#[test]
fn activation_commits_store_projection_then_publishes() {
    let fx = Fixture::new(false);
    let control = fx.control();

    let store = fx.store.clone();
    let projection = fx.projection.clone();
    let observed = Arc::new(Mutex::new(None));
    let slot = observed.clone();
    fx.bus.subscribe(move |change: &ThemeChange| {
        *slot.lock().unwrap() = Some((change.is_dark, projection.is_dark(), store.resolved()));
        Ok(())
    });

    assert_eq!(control.activate(), Theme::Dark);

    assert_eq!(*observed.lock().unwrap(), Some((true, true, Theme::Dark)));
    assert_eq!(control.state(), ToggleState::Verifying { pass: 1 });
    assert_eq!(fx.scheduler.pending(), 1);
}

#[test]
fn clean_verification_returns_to_idle() {
    let fx = Fixture::new(false);
    let control = fx.control();

    control.activate();
    fx.scheduler.run_until_idle();

    assert_eq!(control.state(), ToggleState::Idle);
    assert_eq!(control.intended(), Some(Theme::Dark));
    assert_eq!(fx.origins(), vec![ChangeOrigin::Commit]);
}

#[test]
fn flip_reads_live_projection_not_local_state() {
    let fx = Fixture::new(false);
    let control = fx.control();

    fx.projection.set_dark(true);
    assert_eq!(control.activate(), Theme::Light);
}

#[test]
fn external_overwrite_is_forced_back_and_republished() {
    let fx = Fixture::new(false);
    let control = fx.control();

    control.activate();
    fx.projection.set_dark(false);

    assert!(fx.scheduler.run_next());
    assert!(fx.projection.is_dark());
    assert_eq!(control.state(), ToggleState::Verifying { pass: 2 });

    fx.scheduler.run_until_idle();
    assert_eq!(control.state(), ToggleState::Idle);
    assert_eq!(fx.origins(), vec![ChangeOrigin::Commit, ChangeOrigin::Reconcile]);
    assert_eq!(fx.store.resolved(), Theme::Dark);
}

#[test]
fn persistent_drift_terminates_after_bounded_passes() {
    let fx = Fixture::new(false);
    let control = fx.control();

    control.activate();
    fx.projection.set_dark(false);
    fx.scheduler.run_next();
    fx.projection.set_dark(false);
    fx.scheduler.run_next();

    assert_eq!(control.state(), ToggleState::Idle);
    assert_eq!(fx.scheduler.pending(), 0);
    assert_eq!(fx.origins(), vec![ChangeOrigin::Commit, ChangeOrigin::Reconcile]);
    assert_eq!(fx.store.resolved(), Theme::Dark);
}

#[test]
fn single_pass_limit_never_forces() {
    let fx = Fixture::new(false);
    let control = ToggleControl::new(fx.store.clone(), fx.projection.clone(), fx.bus.clone(), fx.scheduler.clone(), 1);

    control.activate();
    fx.projection.set_dark(false);
    fx.scheduler.run_until_idle();

    assert_eq!(control.state(), ToggleState::Idle);
    assert!(!fx.projection.is_dark());
    assert_eq!(fx.origins(), vec![ChangeOrigin::Commit]);
}

#[test]
fn newer_commit_from_other_control_wins() {
    let fx = Fixture::new(false);
    let first = fx.control();
    let second = fx.control();

    first.activate();
    second.activate();
    fx.scheduler.run_until_idle();

    assert_eq!(first.state(), ToggleState::Idle);
    assert_eq!(second.state(), ToggleState::Idle);
    assert!(!fx.projection.is_dark());
    assert_eq!(fx.store.resolved(), Theme::Light);
    assert_eq!(fx.origins(), vec![ChangeOrigin::Commit, ChangeOrigin::Commit]);
}

#[test]
fn dropped_control_skips_queued_verification() {
    let fx = Fixture::new(false);
    let control = fx.control();
    control.activate();
    drop(control);

    fx.projection.set_dark(false);
    fx.scheduler.run_until_idle();

    assert!(!fx.projection.is_dark());
    assert_eq!(fx.origins(), vec![ChangeOrigin::Commit]);
}

#[test]
fn state_is_committing_while_subscribers_run() {
    let fx = Fixture::new(false);
    let control = fx.control();
    let seen = Arc::new(Mutex::new(None));

    let observer = control.clone();
    let slot = seen.clone();
    fx.bus.subscribe(move |_change: &ThemeChange| {
        *slot.lock().unwrap() = Some(observer.state());
        Ok(())
    });
    control.activate();

    assert_eq!(*seen.lock().unwrap(), Some(ToggleState::Committing));
}
