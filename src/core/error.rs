//! Error types for routing and authentication.
//!
//! - [`PatternError`] - Malformed path templates
//! - [`RouteTableError`] - Configuration-time defects found while building a table
//! - [`RouteNotFound`] - No entry matches a requested path
//! - [`RouteError`] - Named-route lookup and reverse routing failures
//! - [`AuthQueryError`] - The credential store could not be read

use thiserror::Error;

/// Malformed path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),
    #[error("pattern '{0}' contains an empty segment")]
    EmptySegment(String),
    #[error("pattern '{0}' contains a parameter without a name")]
    EmptyParamName(String),
    #[error("pattern '{pattern}' declares parameter '{param}' more than once")]
    DuplicateParam { pattern: String, param: String },
}

/// Defects in a route declaration, reported when the table is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
    /// Two entries share a name; the later one could never be looked up.
    #[error("route name '{name}' is declared more than once")]
    DuplicateName { name: String },
    /// Two patterns accept exactly the same paths; the later one is unreachable.
    #[error("route '{shadowed}' ({pattern}) is unreachable behind route '{first}'")]
    DuplicatePattern {
        first: String,
        shadowed: String,
        pattern: String,
    },
    /// An earlier pattern accepts every path this one does.
    #[error("route '{shadowed}' ({pattern}) is unreachable behind route '{first}'")]
    UnreachableRoute {
        first: String,
        shadowed: String,
        pattern: String,
    },
    #[error("no login route configured")]
    LoginRouteUnset,
    #[error("login route '{0}' is not declared")]
    MissingLoginRoute(String),
    /// Redirecting to a gated login route would loop.
    #[error("login route '{0}' must not require authentication")]
    GatedLoginRoute(String),
    #[error("login route '{0}' must not declare path parameters")]
    ParameterizedLoginRoute(String),
    #[error("invalid route configuration: {0}")]
    Config(String),
}

/// No entry matches the requested (normalized) path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches '{path}'")]
pub struct RouteNotFound {
    pub path: String,
}

/// Failures resolving a route by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route named '{0}'")]
    UnknownName(String),
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
    #[error("route '{route}' does not declare parameter '{param}'")]
    UnexpectedParam { route: String, param: String },
    #[error("invalid value for parameter '{param}': '{value}'")]
    InvalidParamValue { param: String, value: String },
}

/// The authentication state could not be determined.
///
/// The navigation guard treats every variant as "not authenticated".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthQueryError {
    /// Browser window not available
    #[error("browser window not available")]
    NoWindow,
    /// localStorage not available (disabled, sandboxed iframe, ...)
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Reading the credential failed
    #[error("failed to read credential: {0}")]
    ReadFailed(String),
}
