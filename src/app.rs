//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::pages::{
    landing::LandingPage, login::LoginPage, profile::ProfilePage, settings::SettingsPage, wardrobe::WardrobePage,
};
use crate::state::session::provide_auth_session;

/// Root application component.
///
/// Starts the auth session once for the whole app and sets up client-side
/// routing. Everything below reads the session from context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env().unwrap_or_else(|err| {
        leptos::logging::warn!("invalid build configuration, using defaults: {err}");
        ClientConfig::default()
    });
    provide_auth_session(config);

    view! {
        <Title text="Digital Wardrobe"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
                <Route path=StaticSegment("wardrobe") view=WardrobePage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
            </Routes>
        </Router>
    }
}
