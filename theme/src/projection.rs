//! The rendered theme marker and the pre-paint projector.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser the projection is a class on `<html>` that CSS and inline
//! style logic both read. It is the one piece of process-wide mutable state;
//! writes go through `ToggleControl` and the bus reconciliation path only.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::ThemePreference;
use crate::store::PreferenceStore;

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

/// Single boolean marker on the document root, present while dark.
pub trait ThemeProjection: Send + Sync {
    fn is_dark(&self) -> bool;
    fn set_dark(&self, dark: bool);
}

/// In-memory projection used for SSR and tests.
#[derive(Debug, Default)]
pub struct MemoryProjection {
    dark: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryProjection {
    #[must_use]
    pub fn new(dark: bool) -> Self {
        Self { dark: AtomicBool::new(dark), writes: AtomicUsize::new(0) }
    }

    /// Number of `set_dark` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl ThemeProjection for MemoryProjection {
    fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }

    fn set_dark(&self, dark: bool) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.dark.store(dark, Ordering::Relaxed);
    }
}

/// Resolve the stored/ambient preference and apply it to `projection`.
///
/// Runs synchronously before any UI is mounted and has no dependency on the
/// bus. Leaves the projection untouched when it already matches, so calling
/// it again (re-hydration) is a no-op.
pub fn project_initial(store: &PreferenceStore, projection: &dyn ThemeProjection) -> ThemePreference {
    let preference = store.get();
    if projection.is_dark() != preference.is_dark() {
        projection.set_dark(preference.is_dark());
    }
    log::debug!(
        "initial theme projected: {:?} ({:?})",
        preference.theme,
        preference.provenance
    );
    preference
}
