//! Root application component with routing and the theme context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use theme::ThemeConfig;

use crate::pages::{dashboard::DashboardPage, login::LoginPage, not_found::NotFoundPage};
use crate::util::dark_mode::{pre_paint_script, start_runtime};

/// HTML shell rendered on the server for SSR + hydration.
///
/// The pre-paint script runs before the stylesheet applies, so the root
/// carries the dark class before anything is drawn.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let theme_script = pre_paint_script(&ThemeConfig::default());
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script inner_html=theme_script></script>
                <link href="https://fonts.googleapis.com/icon?family=Material+Icons" rel="stylesheet"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Starts the session's theme runtime and provides it to every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(start_runtime(ThemeConfig::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/harvest-hub.css"/>
        <Title text="Market Manager Login | Harvest Hub"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
