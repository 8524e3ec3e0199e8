use std::cell::Cell;

use super::*;

// =============================================================
// Clear state
// =============================================================

#[test]
fn fresh_guard_is_clear_and_renders_content() {
    let mut guard = FaultGuard::new("profile");
    assert!(!guard.has_faulted());
    assert_eq!(guard.render(|| Ok::<_, RenderFault>("profile card")), Guarded::Content("profile card"));
    assert!(!guard.has_faulted());
    assert_eq!(guard.fault_info(), None);
}

// =============================================================
// Tripping
// =============================================================

#[test]
fn returned_fault_renders_fallback_with_label_context() {
    let mut guard = FaultGuard::new("wardrobe");
    let outcome = guard.render(|| Err::<(), _>(RenderFault::failed("item list missing")));
    let expected = FaultInfo { message: "item list missing".to_owned(), context: "wardrobe".to_owned() };
    assert_eq!(outcome, Guarded::Fallback(expected.clone()));
    assert!(guard.has_faulted());
    assert_eq!(guard.fault_info(), Some(&expected));
}

#[test]
fn fault_context_overrides_label() {
    let mut guard = FaultGuard::new("settings");
    let outcome = guard.render(|| Err::<(), _>(RenderFault::failed("bad theme").with_context("settings/appearance")));
    let Guarded::Fallback(info) = outcome else {
        panic!("expected fallback");
    };
    assert_eq!(info.context, "settings/appearance");
}

#[test]
fn panic_during_render_is_contained() {
    let mut guard = FaultGuard::new("profile");
    let outcome = guard.render(|| -> Result<(), RenderFault> { panic!("profile exploded") });
    assert_eq!(
        outcome,
        Guarded::Fallback(FaultInfo { message: "profile exploded".to_owned(), context: "profile".to_owned() })
    );
}

#[test]
fn formatted_panic_message_is_captured() {
    let id = 7;
    let result = capture(|| -> Result<(), RenderFault> { panic!("item {id} has no image") });
    assert_eq!(result, Err(RenderFault::Panicked { message: "item 7 has no image".to_owned() }));
}

// =============================================================
// Faulted is terminal for the instance
// =============================================================

#[test]
fn faulted_guard_never_reinvokes_subtree() {
    let calls = Cell::new(0);
    let mut guard = FaultGuard::new("wardrobe");
    let first = guard.render(|| {
        calls.set(calls.get() + 1);
        Err::<&str, _>(RenderFault::failed("boom"))
    });
    let second = guard.render(|| {
        calls.set(calls.get() + 1);
        Ok("recovered")
    });
    assert_eq!(calls.get(), 1);
    assert_eq!(first, second);
}

#[test]
fn only_first_fault_is_recorded() {
    let mut guard = FaultGuard::new("profile");
    guard.trip(RenderFault::failed("first"));
    let info = guard.trip(RenderFault::failed("second"));
    assert_eq!(info.message, "first");
}

#[test]
fn new_instance_retries_subtree() {
    let mut faulted = FaultGuard::new("profile");
    let _ = faulted.render(|| Err::<(), _>(RenderFault::failed("boom")));
    assert!(faulted.has_faulted());

    let mut remounted = FaultGuard::new("profile");
    let calls = Cell::new(0);
    let outcome = remounted.render(|| {
        calls.set(calls.get() + 1);
        Ok::<_, RenderFault>("ok")
    });
    assert_eq!(outcome, Guarded::Content("ok"));
    assert_eq!(calls.get(), 1);
}

// =============================================================
// Sibling isolation
// =============================================================

#[test]
fn sibling_boundaries_fail_independently() {
    let mut wardrobe = FaultGuard::new("wardrobe");
    let mut profile = FaultGuard::new("profile");
    let broken = wardrobe.render(|| -> Result<&str, RenderFault> { panic!("wardrobe exploded") });
    let healthy = profile.render(|| Ok::<_, RenderFault>("profile card"));
    assert!(matches!(broken, Guarded::Fallback(_)));
    assert_eq!(healthy, Guarded::Content("profile card"));
    assert!(!profile.has_faulted());
}

#[test]
fn nested_boundary_contains_fault_before_outer_sees_it() {
    let mut outer = FaultGuard::new("settings");
    let mut inner = FaultGuard::new("settings/notifications");
    let outcome = outer.render(|| {
        let section = inner.render(|| -> Result<&str, RenderFault> { panic!("toggle missing") });
        Ok::<_, RenderFault>(matches!(section, Guarded::Fallback(_)))
    });
    assert_eq!(outcome, Guarded::Content(true));
    assert!(inner.has_faulted());
    assert!(!outer.has_faulted());
}

// =============================================================
// Fault display
// =============================================================

#[test]
fn render_fault_display() {
    assert_eq!(RenderFault::failed("no items").to_string(), "no items");
    assert_eq!(RenderFault::Panicked { message: "boom".to_owned() }.to_string(), "panicked: boom");
}

#[test]
fn with_context_keeps_panicked_variant() {
    let fault = RenderFault::Panicked { message: "boom".to_owned() }.with_context("ignored");
    assert_eq!(fault, RenderFault::Panicked { message: "boom".to_owned() });
}

// =============================================================
// Scope
// =============================================================

#[cfg(not(feature = "csr"))]
mod scope {
    use leptos::reactive::owner::Owner;

    use super::*;

    #[test]
    fn no_scope_outside_a_boundary() {
        Owner::new().with(|| assert!(FaultScope::current().is_none()));
    }

    #[test]
    fn tripped_scope_stops_calling_subtree() {
        Owner::new().with(|| {
            let scope = FaultScope::new("wardrobe", None);
            let _ = scope.render(|| Err(RenderFault::failed("rail collapsed")));
            assert_eq!(scope.fault().map(|info| info.message), Some("rail collapsed".to_owned()));

            let mut called = false;
            let _ = scope.render(|| {
                called = true;
                Ok(().into_any())
            });
            assert!(!called);
        });
    }

    #[test]
    fn scope_keeps_first_fault_across_renders() {
        Owner::new().with(|| {
            let scope = FaultScope::new("profile", None);
            let _ = scope.render(|| -> Result<AnyView, RenderFault> { panic!("avatar missing") });
            let _ = scope.render(|| Err(RenderFault::failed("second")));
            assert_eq!(
                scope.fault(),
                Some(FaultInfo { message: "avatar missing".to_owned(), context: "profile".to_owned() })
            );
        });
    }
}

// =============================================================
// Rendered boundaries
// =============================================================

#[cfg(not(feature = "csr"))]
mod rendered {
    use leptos::reactive::owner::Owner;
    use leptos::tachys::view::RenderHtml;

    use super::*;

    fn render_html<V: RenderHtml>(build: impl FnOnce() -> V) -> String {
        Owner::new().with(|| build().to_html())
    }

    /// Fails inside its own reactive closure, after the boundary was built.
    #[component]
    fn SnappedRail() -> impl IntoView {
        fallible(|| -> Result<AnyView, RenderFault> { panic!("closet rail snapped") })
    }

    #[component]
    fn EmptyShelf() -> impl IntoView {
        let first: Option<&str> = None;
        let label = first.expect("shelf has no items");
        view! { <p>{label}</p> }
    }

    #[test]
    fn healthy_children_render_unchanged() {
        let html = render_html(|| {
            view! {
                <FaultBoundary label="profile">
                    <p>"profile card"</p>
                </FaultBoundary>
            }
        });
        assert!(html.contains("profile card"));
        assert!(!html.contains(DEFAULT_FALLBACK_MESSAGE));
    }

    #[test]
    fn reactive_panic_shows_fallback_and_spares_sibling() {
        let html = render_html(|| {
            view! {
                <div>
                    <FaultBoundary label="closet">
                        <SnappedRail/>
                    </FaultBoundary>
                    <p>"shoe rack"</p>
                </div>
            }
        });
        assert!(html.contains(DEFAULT_FALLBACK_MESSAGE));
        assert!(html.contains("closet"));
        assert!(html.contains("shoe rack"));
    }

    #[test]
    fn panic_while_building_children_is_contained() {
        let html = render_html(|| {
            view! {
                <div>
                    <FaultBoundary label="shelf">
                        <EmptyShelf/>
                    </FaultBoundary>
                    <p>"hangers"</p>
                </div>
            }
        });
        assert!(html.contains(DEFAULT_FALLBACK_MESSAGE));
        assert!(html.contains("hangers"));
    }

    #[test]
    fn returned_fault_reaches_custom_fallback() {
        let html = render_html(|| {
            let fallback = Callback::new(|info: FaultInfo| {
                view! { <p class="custom">{format!("{} / {}", info.context, info.message)}</p> }.into_any()
            });
            view! {
                <FaultBoundary label="wardrobe" fallback>
                    {fallible(|| Err(RenderFault::failed("no items")))}
                </FaultBoundary>
            }
        });
        assert!(html.contains("wardrobe / no items"));
        assert!(!html.contains(DEFAULT_FALLBACK_MESSAGE));
    }

    #[test]
    fn inner_boundary_contains_fault_and_outer_content_stays() {
        let html = render_html(|| {
            view! {
                <FaultBoundary label="settings">
                    <h2>"Settings"</h2>
                    <FaultBoundary label="settings/notifications">
                        <SnappedRail/>
                    </FaultBoundary>
                </FaultBoundary>
            }
        });
        assert!(html.contains("Settings"));
        assert!(html.contains("settings/notifications"));
    }

    #[test]
    fn fault_outside_any_boundary_renders_no_fallback() {
        let html = render_html(|| render_in(None, || Err(RenderFault::failed("stray"))));
        assert!(!html.contains(DEFAULT_FALLBACK_MESSAGE));
        assert!(!html.contains("stray"));
    }
}
