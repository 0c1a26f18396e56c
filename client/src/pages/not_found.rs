//! Fallback route.

use leptos::prelude::*;

use crate::components::dark_mode_toggle::DarkModeToggle;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <DarkModeToggle/>
            <div class="login-page__center">
                <div class="login-card login-card--center">
                    <h1>"404 Not Found"</h1>
                </div>
            </div>
        </div>
    }
}
