//! Login page exchanging username + password for an access token.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthPhase;
use crate::state::session::use_auth_session;

pub(crate) const AFTER_LOGIN_PATH: &str = "/profile";

/// Where a sign-in started from this page stands once its identity settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SignInOutcome {
    Proceed,
    Failed(&'static str),
}

/// `None` while the identity fetch is still in flight.
pub(crate) fn sign_in_outcome(phase: AuthPhase) -> Option<SignInOutcome> {
    match phase {
        AuthPhase::Loading => None,
        AuthPhase::Authorized => Some(SignInOutcome::Proceed),
        AuthPhase::AuthenticatedPending => {
            Some(SignInOutcome::Failed("Signed in, but your account could not be loaded. Try again."))
        }
        AuthPhase::Unauthenticated => Some(SignInOutcome::Failed("The server rejected the new session. Try again.")),
    }
}

/// Trim and require both credentials.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_auth_session();
    let auth = session.state();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    // Set once a token was issued and its identity is being fetched.
    let awaiting_identity = RwSignal::new(false);

    Effect::new(move || {
        if !awaiting_identity.get() {
            return;
        }
        let Some(outcome) = sign_in_outcome(auth.get().phase()) else {
            return;
        };
        awaiting_identity.set(false);
        busy.set(false);
        match outcome {
            SignInOutcome::Proceed => navigate(AFTER_LOGIN_PATH, NavigateOptions::default()),
            SignInOutcome::Failed(message) => info.set(message.to_owned()),
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (username_value, password_value) = match validate_login_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let api_base = session.config().api_base_url;
            match crate::net::api::login(&api_base, &username_value, &password_value).await {
                Ok(token) => {
                    session.sign_in(token);
                    awaiting_identity.set(true);
                }
                Err(e) => {
                    info.set(format!("Sign-in failed: {e}"));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (username_value, password_value);
            info.set("Sign-in is only available in the browser.".to_owned());
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Digital Wardrobe"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
