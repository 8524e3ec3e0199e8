//! Edge-triggered redirect scheduling.
//!
//! DESIGN
//! ======
//! A redirect is decided during render but must only run after that render is
//! committed, and only once per entry into the unauthenticated phase. The
//! scheduler separates the two steps: `observe` records phase edges and arms
//! at most one pending redirect, `take_due` hands it out exactly once.
//! Leaving the phase or disposing the owner disarms it.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use crate::state::auth::AuthPhase;

/// Something that can move the app to another route.
pub trait Navigator {
    fn navigate(&self, destination: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, destination: &str) {
        self(destination);
    }
}

#[derive(Clone, Debug)]
pub struct RedirectScheduler {
    destination: String,
    last_phase: Option<AuthPhase>,
    pending: Option<String>,
    disposed: bool,
}

impl RedirectScheduler {
    pub fn new(destination: impl Into<String>) -> Self {
        Self { destination: destination.into(), last_phase: None, pending: None, disposed: false }
    }

    /// Record the phase produced by the latest render.
    ///
    /// Returns `true` when this call armed a new redirect.
    pub fn observe(&mut self, phase: AuthPhase) -> bool {
        if self.disposed {
            return false;
        }
        let entering = phase.redirects() && !self.last_phase.is_some_and(AuthPhase::redirects);
        self.last_phase = Some(phase);
        if !phase.redirects() {
            self.pending = None;
            return false;
        }
        if entering {
            self.pending = Some(self.destination.clone());
        }
        entering
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hand out the armed redirect, if any. A redirect is handed out once.
    pub fn take_due(&mut self) -> Option<String> {
        if self.disposed {
            return None;
        }
        self.pending.take()
    }

    /// Permanently disarm. Called when the owning view is torn down.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending = None;
    }

    #[cfg(test)]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
