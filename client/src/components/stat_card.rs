//! Dashboard summary card.

use leptos::prelude::*;

use crate::state::theme::use_is_dark;

#[cfg(test)]
#[path = "stat_card_test.rs"]
mod stat_card_test;

/// Icon tint of a stat card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Emerald,
    Amber,
}

impl Accent {
    fn class(self) -> &'static str {
        match self {
            Self::Blue => "stat-card__icon--blue",
            Self::Emerald => "stat-card__icon--emerald",
            Self::Amber => "stat-card__icon--amber",
        }
    }
}

/// Inline icon background for the light theme.
///
/// Dark-theme tints come from the stylesheet, so this is `None` while dark.
/// Emerald uses its stylesheet tint in both themes.
pub fn icon_background(accent: Accent, is_dark: bool) -> Option<&'static str> {
    if is_dark {
        return None;
    }
    match accent {
        Accent::Blue => Some("rgba(219, 234, 254, 0.5)"),
        Accent::Amber => Some("rgba(254, 243, 199, 0.5)"),
        Accent::Emerald => None,
    }
}

fn icon_style(accent: Accent, is_dark: bool) -> String {
    icon_background(accent, is_dark).map(|color| format!("background-color: {color}")).unwrap_or_default()
}

#[component]
pub fn StatCard(
    icon: &'static str,
    label: &'static str,
    value: &'static str,
    badge: &'static str,
    accent: Accent,
) -> impl IntoView {
    let is_dark = use_is_dark();

    view! {
        <div class="stat-card">
            <div class="stat-card__top">
                <div class=format!("stat-card__icon {}", accent.class()) style=move || icon_style(accent, is_dark.get())>
                    <span class="material-icons">{icon}</span>
                </div>
                <span class="stat-card__badge">{badge}</span>
            </div>
            <p class="stat-card__label">{label}</p>
            <p class="stat-card__value">{value}</p>
        </div>
    }
}
