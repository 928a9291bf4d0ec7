//! Leptos components.
//!
//! - [`AppRouter`] - Guarded router hand-off to the presentation layer

pub mod router;

pub use router::{AppRouter, RouterContext};
