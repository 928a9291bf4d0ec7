//! Navigation guard.
//!
//! Every navigation runs through [`NavigationGuard::resolve`], which matches
//! the target against the route table and checks authentication for gated
//! routes. Resolution is synchronous: it reaches a terminal state before any
//! view is handed to the presentation layer.
//!
//! ```text
//! Requested ─▶ Resolving ─┬─▶ Allowed     (public, authenticated, or not found)
//!                         └─▶ Redirected  (gated and unauthenticated / auth error)
//! ```

use crate::core::auth::AuthSignal;
use crate::core::error::{RouteError, RouteNotFound};
use crate::core::table::RouteTable;
use crate::models::{NavigationRequest, RouteParams, ViewRef};

/// Terminal state of one navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Allowed,
    Redirected,
}

/// Why a navigation was redirected to login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    /// No valid credential is present
    Unauthenticated,
    /// The credential store could not be read; treated as unauthenticated
    AuthUnavailable,
}

/// The view to activate and the inputs it receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub route_name: String,
    pub view: ViewRef,
    pub params: RouteParams,
}

/// Outcome of resolving a [`NavigationRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Proceed to the matched view.
    Allowed(Activation),
    /// No route matches; the presentation layer decides what to show.
    NotFound { path: String },
    /// Go to the login route instead. The requested path is not kept.
    Redirected { to: String, reason: RedirectReason },
}

impl Resolution {
    pub fn state(&self) -> GuardState {
        match self {
            Self::Allowed(_) | Self::NotFound { .. } => GuardState::Allowed,
            Self::Redirected { .. } => GuardState::Redirected,
        }
    }

    /// The activation, if the navigation was allowed onto a matched route.
    pub fn activation(&self) -> Option<&Activation> {
        match self {
            Self::Allowed(activation) => Some(activation),
            _ => None,
        }
    }

    #[inline]
    pub fn is_redirect(&self) -> bool {
        self.state() == GuardState::Redirected
    }
}

/// Gate enforcing the route table's authentication policy.
#[derive(Clone, Debug)]
pub struct NavigationGuard<'a, A> {
    table: &'a RouteTable,
    auth: A,
}

impl<'a, A: AuthSignal> NavigationGuard<'a, A> {
    pub fn new(table: &'a RouteTable, auth: A) -> Self {
        Self { table, auth }
    }

    #[inline]
    pub fn table(&self) -> &'a RouteTable {
        self.table
    }

    /// Resolve one navigation attempt to a terminal state.
    ///
    /// The auth signal is only queried for gated routes, and a failed query
    /// counts as unauthenticated.
    pub fn resolve(&self, request: &NavigationRequest) -> Resolution {
        let matched = match self.table.match_path(&request.target_path) {
            Ok(matched) => matched,
            Err(RouteNotFound { path }) => return Resolution::NotFound { path },
        };

        let entry = matched.entry;
        if entry.requires_auth() {
            let reason = match self.auth.is_authenticated() {
                Ok(true) => None,
                Ok(false) => Some(RedirectReason::Unauthenticated),
                Err(_err) => {
                    #[cfg(target_arch = "wasm32")]
                    web_sys::console::warn_1(
                        &format!("Auth check failed, treating as signed out: {}", _err).into(),
                    );
                    Some(RedirectReason::AuthUnavailable)
                }
            };

            if let Some(reason) = reason {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::debug_1(
                    &format!(
                        "Redirecting '{}' to login ({:?})",
                        request.target_path, reason
                    )
                    .into(),
                );
                return Resolution::Redirected {
                    to: self.table.login_path().to_string(),
                    reason,
                };
            }
        }

        Resolution::Allowed(Activation {
            route_name: entry.name().to_string(),
            view: entry.view().clone(),
            params: matched.params,
        })
    }

    /// Resolve a navigation to a named route.
    pub fn resolve_named(
        &self,
        from_path: &str,
        name: &str,
        params: &RouteParams,
    ) -> Result<Resolution, RouteError> {
        let target = self.table.href(name, params)?;
        Ok(self.resolve(&NavigationRequest::new(from_path, target)))
    }
}
