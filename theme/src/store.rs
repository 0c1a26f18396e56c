//! Durable preference storage with an in-memory session fallback.
//!
//! DESIGN
//! ======
//! `PreferenceStore::get` never fails. When the durable medium cannot be read
//! the store answers from the session value, or from the ambient system
//! signal when the session has no value either. A failed write is kept in
//! memory and retried on the next `get`/`set`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Theme, ThemePreference};

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

/// Failure reported by a [`PreferenceBackend`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The medium cannot be reached at all (disabled, private mode, no window).
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    /// The medium is reachable but refused the write (quota, security policy).
    #[error("preference write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Key/value medium that outlives a page view.
pub trait PreferenceBackend: Send + Sync {
    /// Read the raw value for `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the medium cannot accept the write.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Ambient OS/browser color-scheme signal.
pub trait SystemScheme: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

// =============================================================================
// IN-MEMORY ADAPTERS
// =============================================================================

/// `PreferenceBackend` over a map. Availability can be switched off to model
/// disabled browser storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    offline: AtomicBool,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::Relaxed);
    }

    /// Raw stored value, bypassing availability.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable("memory backend offline".to_owned()));
        }
        Ok(())
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `SystemScheme` with a switchable answer.
#[derive(Debug, Default)]
pub struct FixedScheme {
    dark: AtomicBool,
}

impl FixedScheme {
    #[must_use]
    pub fn new(dark: bool) -> Self {
        Self { dark: AtomicBool::new(dark) }
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::Relaxed);
    }
}

impl SystemScheme for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }
}

// =============================================================================
// PREFERENCE STORE
// =============================================================================

#[derive(Clone, Copy, Debug, Default)]
struct Session {
    theme: Option<Theme>,
    unflushed: bool,
}

/// Last explicit user choice, durable when the backend allows it.
pub struct PreferenceStore {
    backend: Arc<dyn PreferenceBackend>,
    system: Arc<dyn SystemScheme>,
    key: String,
    session: Mutex<Session>,
}

impl PreferenceStore {
    pub fn new(backend: Arc<dyn PreferenceBackend>, system: Arc<dyn SystemScheme>, key: impl Into<String>) -> Self {
        Self { backend, system, key: key.into(), session: Mutex::new(Session::default()) }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the current preference. Never fails.
    pub fn get(&self) -> ThemePreference {
        self.flush_pending();

        let session = *self.lock();
        if session.unflushed {
            if let Some(theme) = session.theme {
                return ThemePreference::explicit(theme);
            }
        }

        match self.backend.load(&self.key) {
            Ok(Some(raw)) => match Theme::from_stored(&raw) {
                Some(theme) => ThemePreference::explicit(theme),
                None => self.system_default(),
            },
            Ok(None) => self.system_default(),
            Err(err) => {
                log::debug!("theme preference read failed, using session/system value: {err}");
                session
                    .theme
                    .map_or_else(|| self.system_default(), ThemePreference::explicit)
            }
        }
    }

    /// Record an explicit choice. A failed durable write is kept for retry.
    pub fn set(&self, theme: Theme) {
        let result = self.backend.save(&self.key, theme.as_stored());
        let mut session = self.lock();
        session.theme = Some(theme);
        session.unflushed = result.is_err();
        drop(session);

        if let Err(err) = result {
            log::warn!("theme preference kept in memory for this session: {err}");
        }
    }

    /// Shorthand for `get().theme`.
    pub fn resolved(&self) -> Theme {
        self.get().theme
    }

    /// True while a failed write is waiting to be retried.
    #[must_use]
    pub fn has_unflushed_write(&self) -> bool {
        self.lock().unflushed
    }

    fn system_default(&self) -> ThemePreference {
        ThemePreference::system(Theme::from_dark(self.system.prefers_dark()))
    }

    fn flush_pending(&self) {
        let session = *self.lock();
        let Some(theme) = session.theme.filter(|_| session.unflushed) else {
            return;
        };
        if self.backend.save(&self.key, theme.as_stored()).is_err() {
            return;
        }

        let mut current = self.lock();
        // A newer set() may have landed while the retry ran.
        if current.theme == Some(theme) {
            current.unflushed = false;
            log::debug!("deferred theme preference write flushed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
