//! Market manager sign-in screen.

use leptos::prelude::*;

use crate::components::dark_mode_toggle::DarkModeToggle;

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

/// Log line for a form submission. Credentials are never included.
pub fn submission_log_line(email: &str) -> &'static str {
    if email.trim().is_empty() { "sign-in submitted without an email" } else { "sign-in submitted" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        email.with_untracked(|email| log::info!("{}", submission_log_line(email)));
    };

    view! {
        <div class="login-page">
            <DarkModeToggle/>
            <div class="login-page__center">
                <div class="login-brand">
                    <span class="material-icons login-brand__icon">"local_florist"</span>
                    <h1 class="login-brand__title">"Harvest Hub"</h1>
                    <p class="login-brand__subtitle">"Market Manager Portal"</p>
                </div>
                <div class="login-card">
                    <h2>"Welcome Back"</h2>
                    <p class="login-card__subtitle">"Sign in to manage your market"</p>
                    <form class="login-form" on:submit=on_submit>
                        <label class="login-label" for="email">"Email Address"</label>
                        <input
                            id="email"
                            class="login-input"
                            type="email"
                            placeholder="manager@harvesthub.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <label class="login-label" for="password">"Password"</label>
                        <input id="password" class="login-input" type="password" placeholder="••••••••"/>
                        <label class="login-remember">
                            <input type="checkbox" id="remember-me"/>
                            "Remember this device"
                        </label>
                        <button class="login-button" type="submit">"SIGN IN TO DASHBOARD"</button>
                    </form>
                </div>
                <p class="login-footer">"Harvest Hub Platform. All rights reserved."</p>
            </div>
        </div>
    }
}
