//! Profile route: the signed-in user's account summary.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::components::account_bar::AccountBar;
use crate::components::auth_gate::AuthGate;
use crate::components::fault_boundary::{FaultBoundary, RenderFault};
use crate::net::types::User;

/// Text shown in the summary card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProfileFields {
    pub heading: String,
    pub handle: String,
    pub email: String,
}

/// A user record without a username cannot be summarised.
pub(crate) fn profile_fields(user: &User) -> Result<ProfileFields, RenderFault> {
    if user.username.trim().is_empty() {
        return Err(RenderFault::failed(format!("user {} has no username", user.id)).with_context("profile/summary"));
    }
    Ok(ProfileFields {
        heading: user.display_name().to_owned(),
        handle: format!("@{}", user.username),
        email: user.email.clone().unwrap_or_else(|| "No email on file".to_owned()),
    })
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let content = Callback::new(|user: User| -> Result<AnyView, RenderFault> {
        let fields = profile_fields(&user)?;
        Ok(view! {
            <AccountBar user/>
            <section class="profile-summary">
                <h2>{fields.heading}</h2>
                <p class="profile-summary__username">{fields.handle}</p>
                <p class="profile-summary__email">{fields.email}</p>
            </section>
        }
        .into_any())
    });
    view! {
        <div class="profile-page">
            <FaultBoundary label="profile">
                <AuthGate content/>
            </FaultBoundary>
        </div>
    }
}
