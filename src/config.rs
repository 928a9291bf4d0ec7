//! Application configuration.
//!
//! Centralizes configuration constants and the process-wide route table.
//! The route declaration is loaded at compile time using `include_str!`.

use std::sync::OnceLock;

use crate::core::RouteTable;

// =============================================================================
// Route Table
// =============================================================================

/// TOML declaration of every route, in match order.
pub const ROUTES_TOML: &str = include_str!("../assets/routes.toml");

static ROUTE_TABLE: OnceLock<RouteTable> = OnceLock::new();

/// The application's route table, built on first use.
///
/// Panics if the embedded declaration is invalid; `tests/routes.rs` keeps it
/// buildable.
pub fn route_table() -> &'static RouteTable {
    ROUTE_TABLE.get_or_init(|| {
        RouteTable::from_toml(ROUTES_TOML).expect("assets/routes.toml must declare a valid table")
    })
}

// =============================================================================
// Authentication
// =============================================================================

/// localStorage key holding the access token issued at login.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
