//! Render-fault isolation for independent feature areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages wrap each feature area (profile, wardrobe, individual settings
//! sections) in a [`FaultBoundary`] so a broken area renders a fallback while
//! its siblings and ancestors keep working.
//!
//! DESIGN
//! ======
//! [`FaultGuard`] supervises one child's render with a static policy: the
//! first fault trips it and it stays tripped for the life of the instance.
//! The faulted subtree is never invoked again; only a new instance (remount)
//! starts clear.
//!
//! The boundary hands its subtree a [`FaultScope`] through context. Views that
//! can fail are rendered with [`fallible`] (or [`render_in`] from inside an
//! existing reactive closure); every run of such a view, including reactive
//! re-renders long after the boundary was built, goes through the scope's
//! guard. A fault shows the fallback in place and trips the boundary, which
//! then swaps its whole subtree for the fallback.
//!
//! SCOPE
//! =====
//! Intercepted: `Err(RenderFault)` from a fallible view, and panics while the
//! boundary's children or a fallible view are being built. Reactive closures
//! that do not go through [`fallible`]/[`render_in`] are outside the
//! boundary's reach, as are event handlers and async tasks; their faults
//! propagate as usual. On `wasm32` builds with `panic = "abort"` a panic cannot
//! be unwound at all, so in the browser only `Err(RenderFault)` is containable.

#[cfg(test)]
#[path = "fault_boundary_test.rs"]
mod fault_boundary_test;

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use leptos::context::Provider;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

pub const DEFAULT_FALLBACK_MESSAGE: &str = "Something went wrong.";

/// A fault raised while a subtree was rendering.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RenderFault {
    #[error("{message}")]
    Failed { message: String, context: Option<String> },
    #[error("panicked: {message}")]
    Panicked { message: String },
}

impl RenderFault {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed { message: message.into(), context: None }
    }

    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::Failed { message, .. } => Self::Failed { message, context: Some(context.into()) },
            panicked @ Self::Panicked { .. } => panicked,
        }
    }

    fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::Panicked { message }
    }
}

/// Diagnostic record kept by a tripped guard and handed to the fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultInfo {
    pub message: String,
    /// Where the fault happened: the fault's own context, or the boundary label.
    pub context: String,
}

/// Result of one supervised render.
#[derive(Debug, PartialEq, Eq)]
pub enum Guarded<V> {
    Content(V),
    Fallback(FaultInfo),
}

#[derive(Clone, Debug, Default)]
pub struct FaultGuard {
    label: String,
    fault: Option<FaultInfo>,
}

impl FaultGuard {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), fault: None }
    }

    #[cfg(test)]
    pub fn has_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault_info(&self) -> Option<&FaultInfo> {
        self.fault.as_ref()
    }

    /// Render `subtree` unless the guard already tripped.
    pub fn render<V, F>(&mut self, subtree: F) -> Guarded<V>
    where
        F: FnOnce() -> Result<V, RenderFault>,
    {
        if let Some(info) = &self.fault {
            return Guarded::Fallback(info.clone());
        }
        match capture(subtree) {
            Ok(view) => Guarded::Content(view),
            Err(fault) => Guarded::Fallback(self.trip(fault)),
        }
    }

    /// Record `fault`. Only the first fault is kept.
    pub fn trip(&mut self, fault: RenderFault) -> FaultInfo {
        if let Some(info) = &self.fault {
            return info.clone();
        }
        let info = match fault {
            RenderFault::Failed { message, context } => {
                FaultInfo { message, context: context.unwrap_or_else(|| self.label.clone()) }
            }
            RenderFault::Panicked { message } => FaultInfo { message, context: self.label.clone() },
        };
        leptos::logging::error!("fault boundary [{}]: render fault contained: {}", info.context, info.message);
        self.record(info)
    }

    /// Adopt an already-built record, e.g. one tripped on a snapshot.
    pub fn record(&mut self, info: FaultInfo) -> FaultInfo {
        self.fault.get_or_insert(info).clone()
    }
}

/// Run `subtree`, converting a panic into [`RenderFault::Panicked`].
pub fn capture<V, F>(subtree: F) -> Result<V, RenderFault>
where
    F: FnOnce() -> Result<V, RenderFault>,
{
    catch_unwind(AssertUnwindSafe(subtree)).unwrap_or_else(|payload| Err(RenderFault::from_panic(&*payload)))
}

/// The nearest enclosing boundary, as seen by its subtree.
#[derive(Clone, Copy)]
pub struct FaultScope {
    guard: StoredValue<FaultGuard>,
    tripped: RwSignal<Option<FaultInfo>>,
    fallback: Option<Callback<FaultInfo, AnyView>>,
}

impl FaultScope {
    pub fn new(label: impl Into<String>, fallback: Option<Callback<FaultInfo, AnyView>>) -> Self {
        Self { guard: StoredValue::new(FaultGuard::new(label)), tripped: RwSignal::new(None), fallback }
    }

    /// Scope provided by the closest [`FaultBoundary`] above the caller.
    pub fn current() -> Option<Self> {
        use_context::<Self>()
    }

    pub fn fault(self) -> Option<FaultInfo> {
        self.guard.try_with_value(|g| g.fault_info().cloned()).flatten()
    }

    /// Render `subtree` under this scope's guard.
    ///
    /// A tripped scope renders its fallback without calling `subtree`.
    pub fn render<F>(self, subtree: F) -> AnyView
    where
        F: FnOnce() -> Result<AnyView, RenderFault>,
    {
        if let Some(info) = self.fault() {
            return self.fallback_view(info);
        }
        // Work on a snapshot: the subtree must not run under the guard's lock.
        let mut snapshot = self.guard.try_get_value().unwrap_or_default();
        match snapshot.render(subtree) {
            Guarded::Content(view) => view,
            Guarded::Fallback(info) => {
                let info = self.guard.try_update_value(|g| g.record(info.clone())).unwrap_or(info);
                if self.tripped.try_get_untracked().flatten().is_none() {
                    self.tripped.try_set(Some(info.clone()));
                }
                self.fallback_view(info)
            }
        }
    }

    pub fn fallback_view(self, info: FaultInfo) -> AnyView {
        match self.fallback {
            Some(fallback) => fallback.run(info),
            None => default_fallback(&info),
        }
    }
}

/// Render through `scope` when there is one.
///
/// Outside any boundary an `Err` is logged and renders nothing, and a panic
/// propagates untouched.
pub fn render_in<F>(scope: Option<FaultScope>, subtree: F) -> AnyView
where
    F: FnOnce() -> Result<AnyView, RenderFault>,
{
    match scope {
        Some(scope) => scope.render(subtree),
        None => subtree().unwrap_or_else(|fault| {
            leptos::logging::error!("render fault outside any fault boundary: {fault}");
            ().into_any()
        }),
    }
}

/// A view that may fail, contained by the nearest [`FaultBoundary`].
///
/// The boundary is looked up when this is called, so call it while building
/// the view. `subtree` re-runs on every reactive update it tracks.
pub fn fallible<F>(subtree: F) -> impl IntoView
where
    F: Fn() -> Result<AnyView, RenderFault> + Send + Sync + 'static,
{
    let scope = FaultScope::current();
    move || render_in(scope, &subtree)
}

/// Fallback used when a boundary is given none.
pub fn default_fallback(info: &FaultInfo) -> AnyView {
    let detail = info.context.clone();
    view! {
        <div class="fault-boundary" role="alert">
            <p>{DEFAULT_FALLBACK_MESSAGE}</p>
            <p class="fault-boundary__context">{detail}</p>
        </div>
    }
    .into_any()
}

/// Contain render faults raised by `children` and by fallible views inside it.
///
/// `fallback` receives the captured [`FaultInfo`]; without one a generic
/// message is shown. `label` names the area in logs and in the fallback.
#[component]
pub fn FaultBoundary(
    children: ChildrenFn,
    #[prop(optional)] fallback: Option<Callback<FaultInfo, AnyView>>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let scope = FaultScope::new(label.unwrap_or_else(|| "unnamed boundary".to_owned()), fallback);

    move || {
        if let Some(info) = scope.tripped.get() {
            return scope.fallback_view(info);
        }
        let children = children.clone();
        view! {
            <Provider value=scope>
                {scope.render(move || Ok(children()))}
            </Provider>
        }
        .into_any()
    }
}
