//! Public landing page; the redirect target for visitors without a credential.

use leptos::prelude::*;

use crate::state::session::use_auth_session;

#[component]
pub fn LandingPage() -> impl IntoView {
    let login_path = use_auth_session().config().login_path;
    view! {
        <div class="landing-page">
            <h1>"Digital Wardrobe"</h1>
            <p>"Catalogue your clothes and plan outfits."</p>
            <a href=login_path class="login-button">
                "Sign in"
            </a>
        </div>
    }
}
