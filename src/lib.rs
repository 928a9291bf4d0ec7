//! Client route table and navigation guard for the community-assistance app.
//!
//! A navigation request is matched against an ordered [`RouteTable`]; the
//! [`NavigationGuard`] then either allows the matched view or redirects to
//! the login route when the route requires authentication and no valid
//! credential is present. Views are opaque to this crate.

pub mod components;
pub mod config;
pub mod core;
pub mod models;
mod utils;

pub use crate::core::{
    Activation, AuthQueryError, AuthSignal, GuardState, NavigationGuard, RedirectReason,
    Resolution, RouteError, RouteNotFound, RouteTable, RouteTableError, TokenAuth,
};
pub use crate::models::{NavigationRequest, RouteEntry, RouteParams, ViewRef};
