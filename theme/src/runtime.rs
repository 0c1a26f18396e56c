//! Session wiring for the theme subsystem.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `ThemeRuntime` exists per page session. `start` runs the initial
//! projection first and only then creates the bus, matching the page
//! lifecycle: the marker is correct before anything subscribes. Every
//! adapter defaults to its in-memory variant, which is what SSR uses.

use std::sync::Arc;

use crate::bus::ThemeBus;
use crate::consumer::ThemeConsumer;
use crate::projection::{MemoryProjection, ThemeProjection, project_initial};
use crate::schedule::{ManualScheduler, Scheduler};
use crate::store::{FixedScheme, MemoryBackend, PreferenceBackend, PreferenceStore, SystemScheme};
use crate::toggle::ToggleControl;
use crate::{Provenance, ThemeConfig, ThemePreference};

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

/// Adapter set for [`ThemeRuntime::start`].
pub struct ThemeRuntimeBuilder {
    config: ThemeConfig,
    backend: Option<Arc<dyn PreferenceBackend>>,
    system: Option<Arc<dyn SystemScheme>>,
    projection: Option<Arc<dyn ThemeProjection>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl ThemeRuntimeBuilder {
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn PreferenceBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn system(mut self, system: Arc<dyn SystemScheme>) -> Self {
        self.system = Some(system);
        self
    }

    #[must_use]
    pub fn projection(mut self, projection: Arc<dyn ThemeProjection>) -> Self {
        self.projection = Some(projection);
        self
    }

    #[must_use]
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Project the initial theme, then open the bus.
    #[must_use]
    pub fn start(self) -> ThemeRuntime {
        let backend = self.backend.unwrap_or_else(|| Arc::new(MemoryBackend::new()));
        let system = self.system.unwrap_or_else(|| Arc::new(FixedScheme::default()));
        let projection = self.projection.unwrap_or_else(|| Arc::new(MemoryProjection::default()));
        let scheduler = self.scheduler.unwrap_or_else(|| Arc::new(ManualScheduler::new()));

        let store = Arc::new(PreferenceStore::new(backend, system, self.config.storage_key.clone()));
        let initial = project_initial(&store, projection.as_ref());
        let bus = ThemeBus::new(Arc::clone(&projection));
        log::info!("theme runtime started: {:?} ({:?})", initial.theme, initial.provenance);

        ThemeRuntime { config: Arc::new(self.config), store, projection, bus, scheduler }
    }
}

/// Shared handle to the session's store, projection, bus and scheduler.
#[derive(Clone)]
pub struct ThemeRuntime {
    config: Arc<ThemeConfig>,
    store: Arc<PreferenceStore>,
    projection: Arc<dyn ThemeProjection>,
    bus: ThemeBus,
    scheduler: Arc<dyn Scheduler>,
}

impl ThemeRuntime {
    #[must_use]
    pub fn builder(config: ThemeConfig) -> ThemeRuntimeBuilder {
        ThemeRuntimeBuilder { config, backend: None, system: None, projection: None, scheduler: None }
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    #[must_use]
    pub fn bus(&self) -> &ThemeBus {
        &self.bus
    }

    /// Rendered value, read once.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.projection.is_dark()
    }

    pub fn preference(&self) -> ThemePreference {
        self.store.get()
    }

    /// A new independent toggle control bound to this session.
    #[must_use]
    pub fn toggle_control(&self) -> ToggleControl {
        ToggleControl::new(
            Arc::clone(&self.store),
            Arc::clone(&self.projection),
            self.bus.clone(),
            Arc::clone(&self.scheduler),
            self.config.max_verifications,
        )
    }

    /// Mount a read-only consumer.
    pub fn consumer(&self, handler: impl Fn(bool) + Send + Sync + 'static) -> ThemeConsumer {
        ThemeConsumer::mount(&self.bus, handler)
    }

    /// Projection observer hook: republish if the marker drifted.
    pub fn reconcile(&self) -> bool {
        self.bus.reconcile()
    }

    /// Re-run the initial projection (re-hydration) and reconcile the bus.
    pub fn reproject(&self) -> ThemePreference {
        let preference = project_initial(&self.store, self.projection.as_ref());
        self.bus.reconcile();
        preference
    }

    /// Ambient color scheme changed. Only matters while no explicit choice
    /// is stored; explicit choices keep their projection. Returns whether
    /// the projection moved.
    pub fn system_scheme_changed(&self) -> bool {
        let preference = self.store.get();
        if preference.provenance != Provenance::SystemDefault {
            return false;
        }
        let before = self.projection.is_dark();
        log::debug!("system color scheme changed, following it to {:?}", preference.theme);
        self.reproject();
        before != preference.is_dark()
    }
}
