//! Wardrobe route. Item management lives in its own feature components; this
//! page only gates and isolates them.

#[cfg(test)]
#[path = "wardrobe_test.rs"]
mod wardrobe_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::components::account_bar::AccountBar;
use crate::components::auth_gate::AuthGate;
use crate::components::fault_boundary::{FaultBoundary, FaultInfo, RenderFault};
use crate::net::types::User;

/// Items are stored per owner id, so the wardrobe needs a persisted user.
pub(crate) fn wardrobe_owner(user: &User) -> Result<i64, RenderFault> {
    if user.id <= 0 {
        return Err(RenderFault::failed(format!("user `{}` has no stored id", user.username)).with_context("wardrobe"));
    }
    Ok(user.id)
}

#[component]
pub fn WardrobePage() -> impl IntoView {
    let content = Callback::new(|user: User| -> Result<AnyView, RenderFault> {
        let owner = wardrobe_owner(&user)?;
        Ok(view! {
            <AccountBar user/>
            <section class="wardrobe" data-owner=owner.to_string()>
                <h2>"My wardrobe"</h2>
            </section>
        }
        .into_any())
    });
    let fallback = Callback::new(|info: FaultInfo| {
        view! {
            <div class="fault-boundary" role="alert">
                <p>"Your wardrobe could not be displayed."</p>
                <p class="fault-boundary__context">{info.message}</p>
            </div>
        }
        .into_any()
    });
    view! {
        <div class="wardrobe-page">
            <FaultBoundary label="wardrobe" fallback>
                <AuthGate content/>
            </FaultBoundary>
        </div>
    }
}
