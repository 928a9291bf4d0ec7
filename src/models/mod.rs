//! Data models for routing.
//!
//! - [`PathPattern`], [`Segment`] - Path templates and matching
//! - [`RouteEntry`], [`ViewRef`] - Declared locations and their views
//! - [`RouteParams`] - Values bound from a concrete path
//! - [`NavigationRequest`] - One attempted transition

mod pattern;
mod route;

pub use pattern::{PathPattern, Segment, normalize_path};
pub use route::{NavigationRequest, RouteEntry, RouteParams, ViewRef};
