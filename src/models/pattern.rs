//! Path templates and path normalization.
//!
//! A pattern such as `/reset-password/:uid/:token` is split into literal and
//! parameter segments. Concrete request paths are normalized before they are
//! aligned against a pattern.

use std::fmt;

use percent_encoding::percent_decode_str;

use crate::core::error::PatternError;
use crate::models::RouteParams;

/// Prefix marking a parameter segment in a pattern.
const PARAM_PREFIX: char = ':';

/// One segment of a [`PathPattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly (case-sensitive)
    Literal(String),
    /// Matches any non-empty request segment and binds it under this name
    Param(String),
}

/// Parsed path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string.
    ///
    /// The pattern must start with `/`. A single trailing slash is ignored, so
    /// `/groups/` and `/groups` are the same pattern.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let Some(body) = raw.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        };
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        if !body.is_empty() {
            for part in body.split('/') {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                }
                match part.strip_prefix(PARAM_PREFIX) {
                    Some("") => return Err(PatternError::EmptyParamName(raw.to_string())),
                    Some(name) => {
                        let duplicate = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        if duplicate {
                            return Err(PatternError::DuplicateParam {
                                pattern: raw.to_string(),
                                param: name.to_string(),
                            });
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as it was declared.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// True if the pattern has no parameter segments.
    pub fn is_static(&self) -> bool {
        self.params().next().is_none()
    }

    /// Align a normalized path against this pattern.
    ///
    /// Returns the bound parameters on a full match, percent-decoded. `path`
    /// must already be normalized with [`normalize_path`]. A parameter that
    /// does not decode to UTF-8 fails the match.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let parts = split_path(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// True if both patterns accept exactly the same paths.
    ///
    /// Parameter names are irrelevant: `/groups/:id` and `/groups/:slug` are
    /// the same shape.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// True if every path `other` accepts is also accepted by `self`.
    ///
    /// Declared earlier, `self` then makes `other` unreachable.
    pub fn covers(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), _) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Literal(_), Segment::Param(_)) => false,
                })
    }

    /// True if at least one concrete path matches both patterns.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Normalize a request path for matching.
///
/// Drops any `#fragment` and `?query`, removes trailing slashes and maps the
/// empty path to `/`.
pub fn normalize_path(path: &str) -> &str {
    let path = path.split_once('#').map_or(path, |(p, _)| p);
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Split a normalized path into segments. The root path has none.
fn split_path(path: &str) -> Vec<&str> {
    let body = path.strip_prefix('/').unwrap_or(path);
    if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    }
}
