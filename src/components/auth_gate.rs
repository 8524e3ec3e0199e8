//! Route guard that renders protected content only for a resolved identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page renders its content through [`AuthGate`]. The gate
//! reads the session snapshot on each render and picks one of three outputs:
//! a loading indicator, a sign-in placeholder, or the content itself.
//!
//! Visitors without a credential are sent to the public landing page. A
//! visitor whose credential is still waiting on an identity sees the same
//! placeholder but stays put, so a slow `/users/me` never bounces a valid
//! session. The placeholder is shown for the frame(s) before the redirect
//! lands so there is no blank flash.
//!
//! The redirect is decided during render and dispatched afterwards from an
//! effect, once per entry into the unauthenticated phase, and never after the
//! gate is torn down. The render that arms a redirect bumps a counter signal;
//! that counter is the effect's only dependency.

#[cfg(test)]
#[path = "auth_gate_test.rs"]
mod auth_gate_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::fault_boundary::{FaultScope, RenderFault, render_in};
use crate::net::types::User;
use crate::state::auth::{AuthPhase, AuthState};
use crate::state::session::use_auth_session;
use crate::util::redirect::{Navigator, RedirectScheduler};

/// What the gate shows for one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateView {
    Loading,
    /// Shared by "no credential" and "credential, identity unresolved".
    SignInRequired,
    Authorized(User),
}

/// Runtime-independent half of [`AuthGate`].
#[derive(Clone, Debug)]
pub struct AuthGateController {
    redirects: RedirectScheduler,
    armed: bool,
}

impl AuthGateController {
    pub fn new(landing_path: impl Into<String>) -> Self {
        Self { redirects: RedirectScheduler::new(landing_path), armed: false }
    }

    /// Render phase: classify the snapshot and record the phase edge.
    pub fn render(&mut self, state: &AuthState) -> GateView {
        let phase = AuthPhase::of(state);
        self.armed = self.redirects.observe(phase);
        match (phase, &state.user) {
            (AuthPhase::Authorized, Some(user)) => GateView::Authorized(user.clone()),
            (AuthPhase::Loading, _) => GateView::Loading,
            _ => GateView::SignInRequired,
        }
    }

    /// Whether the most recent render armed a new redirect.
    pub fn armed(&self) -> bool {
        self.armed
    }

    #[cfg(test)]
    pub fn redirect_pending(&self) -> bool {
        self.redirects.is_pending()
    }

    /// Take the redirect armed by the last render without dispatching it.
    pub fn take_due(&mut self) -> Option<String> {
        self.redirects.take_due()
    }

    /// Teardown. Nothing is handed out after this.
    pub fn dispose(&mut self) {
        self.redirects.dispose();
    }
}

/// Post-render step: navigate to the redirect armed by the last render.
///
/// The redirect is taken out before navigating so the controller is not
/// borrowed while the router runs.
pub fn dispatch_due<N: Navigator + ?Sized>(gate: StoredValue<AuthGateController>, navigator: &N) -> bool {
    let Some(destination) = gate.try_update_value(AuthGateController::take_due).flatten() else {
        return false;
    };
    leptos::logging::log!("auth gate: redirecting to {destination}");
    navigator.navigate(&destination);
    true
}

/// Disarm `gate` when the current owner is cleaned up.
pub fn dispose_on_cleanup(gate: StoredValue<AuthGateController>) {
    on_cleanup(move || {
        gate.try_update_value(AuthGateController::dispose);
    });
}

/// Gate `content` on the current auth session.
///
/// `content` is only ever invoked in the authorized phase and always receives
/// the resolved user. It may fail; an `Err` or a panic is reported to the
/// enclosing [`FaultBoundary`](crate::components::fault_boundary::FaultBoundary)
/// and is not handled here. `redirect_to` defaults to the configured landing
/// path.
#[component]
pub fn AuthGate(
    content: Callback<User, Result<AnyView, RenderFault>>,
    #[prop(optional, into)] redirect_to: Option<String>,
) -> impl IntoView {
    let navigate = use_navigate();
    gate_view(content, redirect_to, move |destination: &str| {
        navigate(destination, NavigateOptions::default());
    })
}

/// Body of [`AuthGate`] with navigation supplied by the caller.
pub fn gate_view<N>(
    content: Callback<User, Result<AnyView, RenderFault>>,
    redirect_to: Option<String>,
    navigator: N,
) -> impl IntoView
where
    N: Navigator + 'static,
{
    let session = use_auth_session();
    let auth = session.state();
    let landing = redirect_to.unwrap_or_else(|| session.config().landing_path);
    let gate = StoredValue::new(AuthGateController::new(landing));
    let faults = FaultScope::current();
    // Bumped by the render that armed a redirect; the effect below depends
    // on it alone, so it runs after that render and not on other auth changes.
    let armed = RwSignal::new(0_u64);

    Effect::new(move || {
        armed.track();
        dispatch_due(gate, &navigator);
    });
    dispose_on_cleanup(gate);

    move || {
        let state = auth.get();
        let (view, armed_now) =
            gate.try_update_value(|g| (g.render(&state), g.armed())).unwrap_or((GateView::Loading, false));
        if armed_now {
            armed.update(|n| *n += 1);
        }
        match view {
            GateView::Loading => view! {
                <div class="auth-gate auth-gate--loading">
                    <p>"Loading..."</p>
                </div>
            }
            .into_any(),
            GateView::SignInRequired => view! {
                <div class="auth-gate auth-gate--signed-out">
                    <p>"Please log in to continue."</p>
                    <p class="auth-gate__hint">"Redirecting..."</p>
                </div>
            }
            .into_any(),
            GateView::Authorized(user) => render_in(faults, || content.run(user)),
        }
    }
}
