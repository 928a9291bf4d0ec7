//! Core routing logic.
//!
//! This module provides:
//! - [`RouteTable`] ordered matching, name lookup and reverse routing
//! - [`NavigationGuard`] authentication gate resolving each navigation
//! - [`AuthSignal`] and [`TokenAuth`] for the injected authentication state

pub mod auth;
pub mod error;
mod guard;
mod table;

pub use auth::{AuthSignal, CredentialStore, LocalStorageStore, TokenAuth};
pub use error::{AuthQueryError, PatternError, RouteError, RouteNotFound, RouteTableError};
pub use guard::{Activation, GuardState, NavigationGuard, RedirectReason, Resolution};
pub use table::{Overlap, RouteMatch, RouteTable, RouteTableBuilder};
