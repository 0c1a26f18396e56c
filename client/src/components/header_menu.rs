//! Signed-in user menu in the dashboard header.

use leptos::prelude::*;

use crate::state::theme::use_is_dark;

#[cfg(test)]
#[path = "header_menu_test.rs"]
mod header_menu_test;

/// Name text color, which is set inline rather than from the stylesheet.
pub fn menu_text_color(is_dark: bool) -> &'static str {
    if is_dark { "rgb(203, 213, 225)" } else { "rgb(0, 0, 0)" }
}

/// Avatar letter for `name`.
pub fn user_initial(name: &str) -> String {
    name.trim().chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

pub fn expand_icon(open: bool) -> &'static str {
    if open { "expand_less" } else { "expand_more" }
}

/// A press closes the menu only while it is open and lands outside it.
pub fn closes_on_press(open: bool, pressed_inside: bool) -> bool {
    open && !pressed_inside
}

#[component]
pub fn HeaderMenu(user_name: &'static str, user_email: &'static str) -> impl IntoView {
    let is_dark = use_is_dark();
    let open = RwSignal::new(false);
    let container = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let handle = window_event_listener(leptos::ev::mousedown, move |ev| {
            let inside = match (container.get_untracked(), ev.target()) {
                (Some(menu), Some(target)) => menu.contains(target.dyn_ref::<web_sys::Node>()),
                _ => false,
            };
            if closes_on_press(open.get_untracked(), inside) {
                open.set(false);
            }
        });
        on_cleanup(move || handle.remove());
    }

    view! {
        <div class="user-menu" node_ref=container>
            <button type="button" class="user-menu__trigger" on:click=move |_| open.update(|o| *o = !*o)>
                <div class="user-menu__avatar">{user_initial(user_name)}</div>
                <span class="user-menu__name" style=move || format!("color: {}", menu_text_color(is_dark.get()))>
                    {user_name}
                </span>
                <span class="material-icons">{move || expand_icon(open.get())}</span>
            </button>
            <Show when=move || open.get()>
                <div class="user-menu__dropdown">
                    <div class="user-menu__identity">
                        <p class="user-menu__identity-name">{user_name}</p>
                        <p class="user-menu__identity-email">{user_email}</p>
                    </div>
                    <button
                        type="button"
                        class="user-menu__logout"
                        on:click=move |_| {
                            log::info!("log out requested");
                            open.set(false);
                        }
                    >
                        <span class="material-icons">"logout"</span>
                        "Log Out"
                    </button>
                </div>
            </Show>
        </div>
    }
}
