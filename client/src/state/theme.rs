//! Theme context hooks.
//!
//! DESIGN
//! ======
//! The `ThemeRuntime` is provided once by `App`. Components never keep their
//! own copy of the dark flag: `use_is_dark` feeds a signal from a bus
//! consumer and releases the registration when the owning scope is cleaned
//! up.
//!
//! TRADE-OFFS
//! ==========
//! The server always renders light, and hydration adopts server markup
//! without rewriting it. The signal therefore starts at the server-rendered
//! value and the consumer is attached in an effect, which runs only after
//! hydration; its on-mount delivery then flips the signal and Leptos patches
//! the DOM.

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;
use theme::{ThemeConsumer, ThemeRuntime};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Dark flag the server rendered with.
pub const SERVER_RENDERED_DARK: bool = false;

/// The session's theme runtime.
pub fn use_theme() -> ThemeRuntime {
    expect_context::<ThemeRuntime>()
}

/// Reactive view of the rendered theme, kept current by the bus.
pub fn use_is_dark() -> ReadSignal<bool> {
    let (is_dark, binding) = track_theme(use_theme());
    Effect::new(move |_| binding.attach());
    is_dark
}

/// Signal seeded with the server-rendered value plus a detached binding.
///
/// The binding is released when the current owner is cleaned up.
pub fn track_theme(runtime: ThemeRuntime) -> (ReadSignal<bool>, ThemeBinding) {
    let (is_dark, set_is_dark) = signal(SERVER_RENDERED_DARK);
    let binding = ThemeBinding { runtime, set_is_dark, consumer: Arc::default() };
    let release = binding.clone();
    on_cleanup(move || release.release());
    (is_dark, binding)
}

/// Connection between a signal and the theme bus.
#[derive(Clone)]
pub struct ThemeBinding {
    runtime: ThemeRuntime,
    set_is_dark: WriteSignal<bool>,
    consumer: Arc<Mutex<Option<ThemeConsumer>>>,
}

impl ThemeBinding {
    /// Mount the consumer once; it delivers the live value immediately.
    pub fn attach(&self) {
        let mut slot = self.consumer.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            let set_is_dark = self.set_is_dark;
            *slot = Some(self.runtime.consumer(move |dark| set_is_dark.set(dark)));
        }
    }

    pub fn release(&self) {
        let consumer = self.consumer.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(consumer) = consumer {
            consumer.unmount();
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.consumer.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
