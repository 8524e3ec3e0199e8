//! Settings route. Each section sits behind its own boundary so one broken
//! panel leaves the others usable.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::components::account_bar::AccountBar;
use crate::components::auth_gate::AuthGate;
use crate::components::fault_boundary::{FaultBoundary, RenderFault, fallible};
use crate::net::types::User;

/// Section ids in display order.
pub(crate) const SETTINGS_SECTIONS: [(&str, &str); 3] =
    [("account", "Account"), ("appearance", "Appearance"), ("notifications", "Notifications")];

pub(crate) fn section_summary(id: &str) -> Result<&'static str, RenderFault> {
    match id {
        "account" => Ok("Username, email, and password."),
        "appearance" => Ok("Theme and layout of your wardrobe."),
        "notifications" => Ok("Which updates reach you, and how."),
        other => Err(RenderFault::failed(format!("unknown settings section `{other}`"))),
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let content =
        Callback::new(|user: User| -> Result<AnyView, RenderFault> { Ok(view! { <SettingsSections user/> }.into_any()) });
    view! {
        <div class="settings-page">
            <FaultBoundary label="settings">
                <AuthGate content/>
            </FaultBoundary>
        </div>
    }
}

#[component]
fn SettingsSections(user: User) -> impl IntoView {
    view! {
        <AccountBar user/>
        {SETTINGS_SECTIONS
            .into_iter()
            .map(|(id, title)| {
                view! {
                    <FaultBoundary label=format!("settings/{id}")>
                        {fallible(move || {
                            let summary = section_summary(id)?;
                            Ok(view! {
                                <section class="settings-section" id=id>
                                    <h3>{title}</h3>
                                    <p>{summary}</p>
                                </section>
                            }
                            .into_any())
                        })}
                    </FaultBoundary>
                }
            })
            .collect_view()}
    }
}
