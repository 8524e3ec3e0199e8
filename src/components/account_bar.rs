//! Header strip for signed-in pages: who is signed in, plus sign-out.
//!
//! Signing out only clears the session; the enclosing `AuthGate` sees the
//! credential disappear and performs the redirect.

use leptos::prelude::*;

use crate::net::types::User;
use crate::state::session::use_auth_session;

#[component]
pub fn AccountBar(user: User) -> impl IntoView {
    let session = use_auth_session();
    let name = user.display_name().to_owned();
    let on_sign_out = move |_| session.sign_out();

    view! {
        <header class="account-bar toolbar">
            <span class="account-bar__name">{name}</span>
            <nav class="account-bar__links">
                <a href="/profile">"Profile"</a>
                <a href="/wardrobe">"Wardrobe"</a>
                <a href="/settings">"Settings"</a>
            </nav>
            <button class="btn" on:click=on_sign_out title="Sign out">
                "Sign out"
            </button>
        </header>
    }
}
