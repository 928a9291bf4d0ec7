//! Ordered route table.
//!
//! The table is built once at startup and never mutated. Lookups walk the
//! entries in declaration order and the first full match wins, so a literal
//! route such as `/groups/create` must be declared before `/groups/:id`.

use std::collections::HashMap;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Deserialize;

use crate::core::error::{RouteError, RouteNotFound, RouteTableError};
use crate::models::{PathPattern, RouteEntry, RouteParams, Segment, ViewRef, normalize_path};

/// Bytes escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ============================================================================
// Match result
// ============================================================================

/// A path resolved to an entry, with the parameter values it bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: RouteParams,
}

/// A later entry that an earlier one shadows for some, but not all, paths.
///
/// Entries shadowed for every path are rejected by the builder instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlap {
    /// Name of the earlier entry, which wins on shared paths
    pub first: String,
    /// Name of the later, partially shadowed entry
    pub shadowed: String,
}

// ============================================================================
// RouteTable
// ============================================================================

/// Immutable, ordered set of routes plus the login redirect target.
#[derive(Clone, Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_name: HashMap<String, usize>,
    login: usize,
    overlaps: Vec<Overlap>,
}

impl RouteTable {
    /// Start declaring a table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Build a table from its TOML declaration.
    ///
    /// ```toml
    /// login = "login"
    ///
    /// [[route]]
    /// path = "/dashboard"
    /// name = "dashboard"
    /// view = "Dashboard"
    /// requires_auth = true
    /// ```
    pub fn from_toml(source: &str) -> Result<Self, RouteTableError> {
        let config: TableConfig =
            toml::from_str(source).map_err(|e| RouteTableError::Config(e.to_string()))?;

        config
            .routes
            .into_iter()
            .fold(Self::builder().login(config.login), |builder, route| {
                let view = ViewRef {
                    component: route.view,
                    lazy: route.lazy,
                };
                builder.declare(route.path, route.name, view, route.requires_auth)
            })
            .build()
    }

    /// Resolve a concrete path to the first matching entry.
    ///
    /// The path is normalized first: query string, fragment and trailing slash
    /// are ignored. Bound parameter values are percent-decoded.
    pub fn match_path(&self, path: &str) -> Result<RouteMatch<'_>, RouteNotFound> {
        let normalized = normalize_path(path);
        self.entries
            .iter()
            .find_map(|entry| {
                entry
                    .pattern()
                    .match_path(normalized)
                    .map(|params| RouteMatch { entry, params })
            })
            .ok_or_else(|| RouteNotFound {
                path: normalized.to_string(),
            })
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Build the concrete path for a named route.
    ///
    /// Every parameter the pattern declares must be supplied, and nothing else.
    /// Values are percent-encoded, so [`RouteTable::match_path`] binds them back
    /// unchanged.
    pub fn href(&self, name: &str, params: &RouteParams) -> Result<String, RouteError> {
        let entry = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;

        if let Some((param, _)) = params
            .iter()
            .find(|(param, _)| !entry.params().any(|declared| declared == *param))
        {
            return Err(RouteError::UnexpectedParam {
                route: name.to_string(),
                param: param.to_string(),
            });
        }

        let mut path = String::new();
        for segment in entry.pattern().segments() {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(param) => {
                    let value = params.get(param).ok_or_else(|| RouteError::MissingParam {
                        route: name.to_string(),
                        param: param.clone(),
                    })?;
                    if value.is_empty() {
                        return Err(RouteError::InvalidParamValue {
                            param: param.clone(),
                            value: value.to_string(),
                        });
                    }
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// The redirect target for unauthenticated access.
    pub fn login(&self) -> &RouteEntry {
        &self.entries[self.login]
    }

    /// Concrete path of the login entry.
    pub fn login_path(&self) -> &str {
        self.login().pattern().as_str()
    }

    /// Partial overlaps found while building.
    pub fn overlaps(&self) -> &[Overlap] {
        &self.overlaps
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Clone, Debug)]
struct Declaration {
    pattern: String,
    name: String,
    view: ViewRef,
    requires_auth: bool,
}

/// Collects route declarations and validates them as a whole.
#[derive(Clone, Debug, Default)]
pub struct RouteTableBuilder {
    declarations: Vec<Declaration>,
    login: Option<String>,
}

impl RouteTableBuilder {
    /// Declare a public route.
    pub fn route(self, pattern: impl Into<String>, name: impl Into<String>, view: ViewRef) -> Self {
        self.declare(pattern, name, view, false)
    }

    /// Declare a route that requires authentication.
    pub fn protected(
        self,
        pattern: impl Into<String>,
        name: impl Into<String>,
        view: ViewRef,
    ) -> Self {
        self.declare(pattern, name, view, true)
    }

    /// Name the route unauthenticated users are redirected to.
    pub fn login(mut self, name: impl Into<String>) -> Self {
        self.login = Some(name.into());
        self
    }

    fn declare(
        mut self,
        pattern: impl Into<String>,
        name: impl Into<String>,
        view: ViewRef,
        requires_auth: bool,
    ) -> Self {
        self.declarations.push(Declaration {
            pattern: pattern.into(),
            name: name.into(),
            view,
            requires_auth,
        });
        self
    }

    /// Validate the declarations and freeze them into a [`RouteTable`].
    ///
    /// Rejects duplicate names, patterns an earlier pattern fully covers, and a
    /// missing or unusable login route. Partial overlaps are kept and reported
    /// through [`RouteTable::overlaps`].
    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(self.declarations.len());
        let mut by_name = HashMap::new();
        let mut overlaps = Vec::new();

        for decl in self.declarations {
            let pattern = PathPattern::parse(&decl.pattern)?;

            if by_name.contains_key(&decl.name) {
                return Err(RouteTableError::DuplicateName { name: decl.name });
            }

            for earlier in &entries {
                if earlier.pattern().same_shape(&pattern) {
                    return Err(RouteTableError::DuplicatePattern {
                        first: earlier.name().to_string(),
                        shadowed: decl.name,
                        pattern: decl.pattern,
                    });
                }
                if earlier.pattern().covers(&pattern) {
                    return Err(RouteTableError::UnreachableRoute {
                        first: earlier.name().to_string(),
                        shadowed: decl.name,
                        pattern: decl.pattern,
                    });
                }
                if earlier.pattern().overlaps(&pattern) {
                    #[cfg(target_arch = "wasm32")]
                    web_sys::console::warn_1(
                        &format!(
                            "Route '{}' ({}) is shadowed by '{}' ({}) for some paths",
                            decl.name,
                            pattern,
                            earlier.name(),
                            earlier.pattern()
                        )
                        .into(),
                    );
                    overlaps.push(Overlap {
                        first: earlier.name().to_string(),
                        shadowed: decl.name.clone(),
                    });
                }
            }

            by_name.insert(decl.name.clone(), entries.len());
            entries.push(
                RouteEntry::new(pattern, decl.name, decl.view).with_auth(decl.requires_auth),
            );
        }

        let login_name = self.login.ok_or(RouteTableError::LoginRouteUnset)?;
        let login = *by_name
            .get(&login_name)
            .ok_or_else(|| RouteTableError::MissingLoginRoute(login_name.clone()))?;
        if entries[login].requires_auth() {
            return Err(RouteTableError::GatedLoginRoute(login_name));
        }
        if !entries[login].pattern().is_static() {
            return Err(RouteTableError::ParameterizedLoginRoute(login_name));
        }

        Ok(RouteTable {
            entries,
            by_name,
            login,
            overlaps,
        })
    }
}

// ============================================================================
// TOML declaration
// ============================================================================

#[derive(Debug, Deserialize)]
struct TableConfig {
    login: String,
    #[serde(default, rename = "route")]
    routes: Vec<RouteConfig>,
}

#[derive(Debug, Deserialize)]
struct RouteConfig {
    path: String,
    name: String,
    view: String,
    #[serde(default)]
    lazy: bool,
    #[serde(default)]
    requires_auth: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteTable {
        RouteTable::builder()
            .route("/home", "home", ViewRef::eager("Home"))
            .route("/", "login", ViewRef::eager("Login"))
            .protected("/dashboard", "dashboard", ViewRef::eager("Dashboard"))
            .protected("/groups/create", "create-group", ViewRef::eager("CreateGroup"))
            .route("/groups/:id", "GroupDetails", ViewRef::lazy("GroupDetails"))
            .route(
                "/reset-password/:uid/:token",
                "reset-password",
                ViewRef::eager("ResetPassword"),
            )
            .login("login")
            .build()
            .unwrap()
    }

    #[test]
    fn test_static_match_is_stable() {
        let table = sample();
        let first = table.match_path("/home").unwrap();
        let second = table.match_path("/home").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.entry.name(), "home");
        assert!(first.params.is_empty());
    }

    #[test]
    fn test_match_binds_params() {
        let table = sample();
        let m = table.match_path("/groups/42").unwrap();
        assert_eq!(m.entry.name(), "GroupDetails");
        assert_eq!(m.params.get("id"), Some("42"));
        assert_eq!(m.params.len(), 1);
    }

    #[test]
    fn test_match_normalizes_path() {
        let table = sample();
        assert_eq!(table.match_path("/dashboard/").unwrap().entry.name(), "dashboard");
        assert_eq!(
            table.match_path("/groups/7?tab=events").unwrap().params.get("id"),
            Some("7")
        );
        assert_eq!(table.match_path("").unwrap().entry.name(), "login");
    }

    #[test]
    fn test_declaration_order_wins() {
        let table = sample();
        assert_eq!(
            table.match_path("/groups/create").unwrap().entry.name(),
            "create-group"
        );
    }

    #[test]
    fn test_not_found() {
        let table = sample();
        assert_eq!(
            table.match_path("/nowhere/"),
            Err(RouteNotFound {
                path: "/nowhere".to_string()
            })
        );
        assert!(table.match_path("/Home").is_err());
    }

    #[test]
    fn test_overlap_reported() {
        let table = sample();
        assert_eq!(
            table.overlaps(),
            &[Overlap {
                first: "create-group".to_string(),
                shadowed: "GroupDetails".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = RouteTable::builder()
            .route("/", "login", ViewRef::eager("Login"))
            .route("/login", "login", ViewRef::eager("Login"))
            .login("login")
            .build();
        assert_eq!(
            result.unwrap_err(),
            RouteTableError::DuplicateName {
                name: "login".to_string()
            }
        );
    }

    #[test]
    fn test_unreachable_pattern_rejected() {
        let result = RouteTable::builder()
            .route("/", "login", ViewRef::eager("Login"))
            .route("/events/:id", "EventDetails", ViewRef::lazy("EventDetails"))
            .route("/events/:slug/", "EventBySlug", ViewRef::lazy("EventBySlug"))
            .login("login")
            .build();
        assert_eq!(
            result.unwrap_err(),
            RouteTableError::DuplicatePattern {
                first: "EventDetails".to_string(),
                shadowed: "EventBySlug".to_string(),
                pattern: "/events/:slug/".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = RouteTable::builder()
            .route("/", "login", ViewRef::eager("Login"))
            .route("chat/:roomName", "ChatRoom", ViewRef::lazy("ChatRoom"))
            .login("login")
            .build();
        assert!(matches!(result, Err(RouteTableError::InvalidPattern(_))));
    }

    #[test]
    fn test_login_route_validation() {
        let missing = RouteTable::builder()
            .route("/home", "home", ViewRef::eager("Home"))
            .login("login")
            .build();
        assert_eq!(
            missing.unwrap_err(),
            RouteTableError::MissingLoginRoute("login".to_string())
        );

        let unset = RouteTable::builder()
            .route("/", "login", ViewRef::eager("Login"))
            .build();
        assert_eq!(unset.unwrap_err(), RouteTableError::LoginRouteUnset);

        let gated = RouteTable::builder()
            .protected("/login", "login", ViewRef::eager("Login"))
            .login("login")
            .build();
        assert_eq!(
            gated.unwrap_err(),
            RouteTableError::GatedLoginRoute("login".to_string())
        );

        let parameterized = RouteTable::builder()
            .route("/login/:next", "login", ViewRef::eager("Login"))
            .login("login")
            .build();
        assert_eq!(
            parameterized.unwrap_err(),
            RouteTableError::ParameterizedLoginRoute("login".to_string())
        );
    }

    #[test]
    fn test_get_and_login() {
        let table = sample();
        assert_eq!(table.get("dashboard").unwrap().view().component, "Dashboard");
        assert!(table.get("missing").is_none());
        assert_eq!(table.login().name(), "login");
        assert_eq!(table.login_path(), "/");
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_href() {
        let table = sample();
        assert_eq!(table.href("login", &RouteParams::new()).unwrap(), "/");
        assert_eq!(table.href("dashboard", &RouteParams::new()).unwrap(), "/dashboard");

        let params: RouteParams = [("uid", "abc"), ("token", "xyz123")].into_iter().collect();
        let path = table.href("reset-password", &params).unwrap();
        assert_eq!(path, "/reset-password/abc/xyz123");

        let m = table.match_path(&path).unwrap();
        assert_eq!(m.entry.name(), "reset-password");
        assert_eq!(m.params, params);
    }

    #[test]
    fn test_href_errors() {
        let table = sample();
        assert_eq!(
            table.href("nope", &RouteParams::new()),
            Err(RouteError::UnknownName("nope".to_string()))
        );
        assert_eq!(
            table.href("GroupDetails", &RouteParams::new()),
            Err(RouteError::MissingParam {
                route: "GroupDetails".to_string(),
                param: "id".to_string(),
            })
        );
        let extra: RouteParams = [("id", "1")].into_iter().collect();
        assert_eq!(
            table.href("home", &extra),
            Err(RouteError::UnexpectedParam {
                route: "home".to_string(),
                param: "id".to_string(),
            })
        );
        let empty: RouteParams = [("id", "")].into_iter().collect();
        assert!(matches!(
            table.href("GroupDetails", &empty),
            Err(RouteError::InvalidParamValue { .. })
        ));
    }

    #[test]
    fn test_href_encodes_and_match_decodes() {
        let table = sample();
        for value in ["my room", "50%", "a/b?c#d", "café"] {
            let params: RouteParams = [("id", value)].into_iter().collect();
            let path = table.href("GroupDetails", &params).unwrap();
            let m = table.match_path(&path).unwrap();
            assert_eq!(m.entry.name(), "GroupDetails", "{}", path);
            assert_eq!(m.params.get("id"), Some(value), "{}", path);
        }

        let params: RouteParams = [("id", "50%")].into_iter().collect();
        assert_eq!(table.href("GroupDetails", &params).unwrap(), "/groups/50%25");
        let params: RouteParams = [("id", "my room")].into_iter().collect();
        assert_eq!(table.href("GroupDetails", &params).unwrap(), "/groups/my%20room");
    }

    #[test]
    fn test_covered_route_rejected() {
        let result = RouteTable::builder()
            .route("/", "login", ViewRef::eager("Login"))
            .route("/groups/:id", "GroupDetails", ViewRef::lazy("GroupDetails"))
            .protected("/groups/create", "create-group", ViewRef::eager("CreateGroup"))
            .login("login")
            .build();
        assert_eq!(
            result.unwrap_err(),
            RouteTableError::UnreachableRoute {
                first: "GroupDetails".to_string(),
                shadowed: "create-group".to_string(),
                pattern: "/groups/create".to_string(),
            }
        );
    }

    #[test]
    fn test_from_toml() {
        let table = RouteTable::from_toml(
            r#"
            login = "login"

            [[route]]
            path = "/"
            name = "login"
            view = "Login"

            [[route]]
            path = "/chat/:roomName"
            name = "ChatRoom"
            view = "ChatRoom"
            lazy = true
            requires_auth = true
            "#,
        )
        .unwrap();

        let chat = table.get("ChatRoom").unwrap();
        assert!(chat.requires_auth());
        assert!(chat.view().lazy);
        assert!(!table.login().requires_auth());
    }

    #[test]
    fn test_from_toml_rejects_malformed() {
        let result = RouteTable::from_toml("[[route]]\npath = 3\n");
        assert!(matches!(result, Err(RouteTableError::Config(_))));
    }
}
