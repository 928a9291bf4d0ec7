//! Application router component.
//!
//! Tracks the browser location (History API, `popstate`) and runs every
//! location change through the [`NavigationGuard`] before anything renders.
//!
//! # Architecture
//!
//! - **Location signal is the source of truth**: pathname + query string
//! - **Guard runs first**: a redirect replaces the history entry and renders
//!   nothing, so a gated view never starts initializing
//! - **Views are opaque**: the `render` callback owned by the presentation
//!   layer turns an allowed [`Resolution`] into a view

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::config::route_table;
use crate::core::{NavigationGuard, Resolution, RouteError, TokenAuth};
use crate::models::{NavigationRequest, RouteParams};
use crate::utils::dom;

// ============================================================================
// Router Context
// ============================================================================

/// Programmatic navigation, provided to descendants of [`AppRouter`].
#[derive(Clone, Copy)]
pub struct RouterContext {
    location: RwSignal<String>,
}

impl RouterContext {
    /// Navigate to a concrete path, adding a history entry.
    pub fn navigate(&self, path: &str) {
        dom::push_path(path);
        self.location.set(path.to_string());
    }

    /// Navigate to a named route.
    pub fn navigate_named(&self, name: &str, params: &RouteParams) -> Result<(), RouteError> {
        let path = route_table().href(name, params)?;
        self.navigate(&path);
        Ok(())
    }

    /// Current location (path + query string).
    pub fn location(&self) -> Signal<String> {
        self.location.into()
    }
}

// ============================================================================
// Main Router
// ============================================================================

/// Main application router.
///
/// `render` receives every allowed resolution, including
/// [`Resolution::NotFound`], and decides what to show for it.
#[component]
pub fn AppRouter(#[prop(into)] render: Callback<Resolution, AnyView>) -> impl IntoView {
    let location = RwSignal::new(dom::current_location());
    let previous = StoredValue::new(String::new());

    // Back/forward buttons (runs once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            location.set(dom::current_location());
        }) as Box<dyn Fn()>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    provide_context(RouterContext { location });

    let guard = NavigationGuard::new(route_table(), TokenAuth::browser());
    let resolution = Memo::new(move |_| {
        let target = location.get();
        let from = previous.get_value();
        previous.set_value(target.clone());
        guard.resolve(&NavigationRequest::new(from, target))
    });

    // Redirects replace the gated entry so "back" doesn't bounce into it again
    Effect::new(move |_| {
        if let Resolution::Redirected { to, .. } = resolution.get() {
            dom::replace_path(&to);
            location.set(to);
        }
    });

    view! {
        {move || match resolution.get() {
            Resolution::Redirected { .. } => None,
            allowed => Some(render.run(allowed)),
        }}
    }
}
