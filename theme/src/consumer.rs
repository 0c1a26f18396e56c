//! Read-only theme consumers with scoped bus registrations.

use std::sync::Arc;

use crate::bus::{Subscription, ThemeBus, ThemeChange};

#[cfg(test)]
#[path = "consumer_test.rs"]
mod consumer_test;

/// A mounted reader of the theme.
///
/// `mount` hands the handler the current projection immediately, since the
/// component may mount after the last publish, then forwards every bus
/// notification. The registration is released on `unmount` or drop.
pub struct ThemeConsumer {
    bus: ThemeBus,
    subscription: Subscription,
}

impl ThemeConsumer {
    pub fn mount(bus: &ThemeBus, handler: impl Fn(bool) + Send + Sync + 'static) -> Self {
        let handler = Arc::new(handler);
        handler(bus.projection_is_dark());

        let forward = Arc::clone(&handler);
        let subscription = bus.subscribe(move |change: &ThemeChange| {
            forward(change.is_dark);
            Ok(())
        });
        Self { bus: bus.clone(), subscription }
    }

    /// Read the current value once, outside of notifications.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.bus.projection_is_dark()
    }

    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for ThemeConsumer {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
