//! Button that flips between light and dark themes.
//!
//! Any number of these can be mounted; each owns an independent
//! `ToggleControl` and they converge through the shared bus.

use leptos::prelude::*;

use crate::state::theme::{use_is_dark, use_theme};

#[cfg(test)]
#[path = "dark_mode_toggle_test.rs"]
mod dark_mode_toggle_test;

/// Material icon for the action the button performs next.
pub fn toggle_icon(is_dark: bool) -> &'static str {
    if is_dark { "light_mode" } else { "dark_mode" }
}

#[component]
pub fn DarkModeToggle(
    /// Extra classes, e.g. to pin the button to another corner.
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    let control = use_theme().toggle_control();
    let is_dark = use_is_dark();

    view! {
        <button
            type="button"
            class=format!("dark-mode-toggle {class}")
            aria-label="Toggle dark mode"
            on:click=move |_| {
                let next = control.activate();
                log::debug!("dark mode toggle -> {next:?}");
            }
        >
            <span class="material-icons">{move || toggle_icon(is_dark.get())}</span>
        </button>
    }
}
