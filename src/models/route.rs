//! Route entries and the values that flow through a navigation.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::PathPattern;

// ============================================================================
// View handle
// ============================================================================

/// Opaque handle to a view owned by the presentation layer.
///
/// The router never instantiates views. It only hands this handle, together
/// with the bound parameters, to whoever renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewRef {
    /// Component identifier (e.g., "Dashboard", "GroupDetails")
    pub component: String,
    /// Loaded on first activation rather than bundled up front
    pub lazy: bool,
}

impl ViewRef {
    /// Handle to an eagerly loaded view.
    pub fn eager(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            lazy: false,
        }
    }

    /// Handle to a view loaded on first activation.
    pub fn lazy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            lazy: true,
        }
    }
}

// ============================================================================
// Route parameters
// ============================================================================

/// Parameter values bound while matching a path, keyed by parameter name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Decode the parameters into a view's typed props.
    ///
    /// Values stay strings; a field typed as a number will fail to decode.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(&self.0)?)
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// RouteEntry
// ============================================================================

/// One navigable location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pattern: PathPattern,
    name: String,
    view: ViewRef,
    requires_auth: bool,
}

impl RouteEntry {
    /// Create a public (ungated) entry.
    pub fn new(pattern: PathPattern, name: impl Into<String>, view: ViewRef) -> Self {
        Self {
            pattern,
            name: name.into(),
            view,
            requires_auth: false,
        }
    }

    /// Gate this entry behind authentication.
    pub fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    #[inline]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn view(&self) -> &ViewRef {
        &self.view
    }

    #[inline]
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Parameter names declared by the pattern, in order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.pattern.params()
    }
}

// ============================================================================
// NavigationRequest
// ============================================================================

/// A single attempted transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Requested location, possibly with query string or trailing slash
    pub target_path: String,
    /// Previous location; empty on the initial navigation
    pub from_path: String,
}

impl NavigationRequest {
    /// Initial navigation (no previous location).
    pub fn initial(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            from_path: String::new(),
        }
    }

    /// Navigation from `from_path` to `target_path`.
    pub fn new(from_path: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            from_path: from_path.into(),
        }
    }

    /// True if this is the first navigation of the session.
    pub fn is_initial(&self) -> bool {
        self.from_path.is_empty()
    }
}
