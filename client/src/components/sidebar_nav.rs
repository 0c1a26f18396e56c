//! Dashboard side navigation.

use leptos::prelude::*;

/// `(label, material icon)` for each navigation entry.
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Financial Overview", "dashboard"),
    ("Daily Reports", "description"),
    ("Vendor Analytics", "analytics"),
    ("Tax Compliance", "receipt"),
    ("Revenue Audits", "assessment"),
];

#[component]
pub fn SidebarNav(active: &'static str) -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">
                <span class="material-icons">"storefront"</span>
                <h1>"MarketOS"</h1>
            </div>
            <nav class="sidebar__nav">
                {NAV_ITEMS
                    .iter()
                    .map(|&(label, icon)| {
                        let class = if label == active { "sidebar__item sidebar__item--active" } else { "sidebar__item" };
                        view! {
                            <a class=class href="#">
                                <span class="material-icons">{icon}</span>
                                {label}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="sidebar__status">
                <p class="sidebar__status-title">"Market Status"</p>
                <p class="sidebar__status-market">"Downtown Saturday Market"</p>
                <span class="sidebar__status-badge">"Open"</span>
            </div>
        </aside>
    }
}
