//! Dark/light theme state shared by every Harvest Hub screen.
//!
//! This crate is UI-framework agnostic so the client can drive it from Leptos
//! while tests drive it directly. Browser concerns (localStorage, the `<html>`
//! class list, `matchMedia`, microtasks) enter through the traits in
//! [`store`], [`projection`], and [`schedule`].
//!
//! DATA FLOW
//! =========
//! `ToggleControl` writes the `PreferenceStore`, sets the projection, then
//! publishes on the `ThemeBus`; consumers re-render from bus notifications.
//! `project_initial` runs once before the bus exists to seed the projection.

pub mod bus;
pub mod consumer;
pub mod projection;
pub mod runtime;
pub mod schedule;
pub mod store;
pub mod toggle;

use serde::{Deserialize, Serialize};

pub use bus::{ChangeOrigin, CommitId, HandlerError, Subscription, SubscriptionId, ThemeBus, ThemeChange};
pub use consumer::ThemeConsumer;
pub use projection::{MemoryProjection, ThemeProjection, project_initial};
pub use runtime::{ThemeRuntime, ThemeRuntimeBuilder};
pub use schedule::{ManualScheduler, Scheduler, Task};
pub use store::{FixedScheme, MemoryBackend, PreferenceBackend, PreferenceStore, StorageError, SystemScheme};
pub use toggle::{ToggleControl, ToggleState};

/// localStorage key holding `"true"`/`"false"`.
pub const DEFAULT_STORAGE_KEY: &str = "darkMode";
/// Class on the document root, present while dark.
pub const DEFAULT_DARK_CLASS: &str = "dark";
/// Name of the window event broadcast on every committed change.
pub const DEFAULT_CHANGE_EVENT: &str = "darkModeChange";
/// Verification passes a toggle makes before accepting drift.
pub const DEFAULT_MAX_VERIFICATIONS: u8 = 2;


// =============================================================================
// THEME VALUES
// =============================================================================

/// Binary appearance choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Durable encoding written under the storage key.
    #[must_use]
    pub fn as_stored(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }

    /// Decode a stored value.
    ///
    /// `"true"` is dark, an empty string counts as no choice at all, and any
    /// other value is an explicit light choice. The pre-paint script in the
    /// client decodes the same way so both paths agree on first paint.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            "true" => Some(Self::Dark),
            _ => Some(Self::Light),
        }
    }
}

/// Where a resolved preference came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The user toggled explicitly and the value was persisted.
    UserExplicit,
    /// Nothing stored; derived from the ambient color-scheme signal.
    SystemDefault,
}

/// A theme together with its provenance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreference {
    pub theme: Theme,
    pub provenance: Provenance,
}

impl ThemePreference {
    #[must_use]
    pub fn explicit(theme: Theme) -> Self {
        Self { theme, provenance: Provenance::UserExplicit }
    }

    #[must_use]
    pub fn system(theme: Theme) -> Self {
        Self { theme, provenance: Provenance::SystemDefault }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self.theme.is_dark()
    }

    #[must_use]
    pub fn is_explicit(self) -> bool {
        self.provenance == Provenance::UserExplicit
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Names and limits shared by the core and its browser adapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub dark_class: String,
    pub change_event: String,
    /// Total verification passes per commit, including the first.
    pub max_verifications: u8,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            dark_class: DEFAULT_DARK_CLASS.to_owned(),
            change_event: DEFAULT_CHANGE_EVENT.to_owned(),
            max_verifications: DEFAULT_MAX_VERIFICATIONS,
        }
    }
}

impl ThemeConfig {
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_dark_class(mut self, class: impl Into<String>) -> Self {
        self.dark_class = class.into();
        self
    }

    #[must_use]
    pub fn with_change_event(mut self, event: impl Into<String>) -> Self {
        self.change_event = event.into();
        self
    }

    /// Clamped to at least one pass.
    #[must_use]
    pub fn with_max_verifications(mut self, passes: u8) -> Self {
        self.max_verifications = passes.max(1);
        self
    }
}
