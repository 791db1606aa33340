//! Hierarchical resource identifiers and case-aware comparison.

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scheme assumed when a resource is written as a bare absolute path.
pub const FILE_SCHEME: &str = "file";

/// A normalized hierarchical resource identifier (`scheme://authority/path`).
///
/// The path is always absolute, `/`-separated, free of `.` and `..`
/// segments, and carries no trailing slash except for the root `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceUri {
    scheme: String,
    authority: String,
    path: String,
}

impl ResourceUri {
    /// Creates a resource from its parts, normalizing the path.
    pub fn new(scheme: impl Into<String>, authority: impl Into<String>, path: &str) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
            path: Self::normalize_path(path),
        }
    }

    /// Creates a `file` resource for the given path.
    pub fn file(path: &str) -> Self {
        Self::new(FILE_SCHEME, "", path)
    }

    /// Parses `scheme://authority/path` or a bare path.
    ///
    /// Bare paths get the `file` scheme. Backslashes are treated as separators.
    pub fn parse(input: &str) -> Self {
        match input.split_once("://") {
            Some((scheme, rest)) if Self::is_scheme(scheme) => {
                let (authority, path) = match rest.find('/') {
                    Some(idx) => rest.split_at(idx),
                    None => (rest, "/"),
                };
                Self::new(scheme, authority, path)
            }
            _ => Self::file(input),
        }
    }

    fn is_scheme(candidate: &str) -> bool {
        let mut chars = candidate.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    }

    fn normalize_path(path: &str) -> String {
        let mut segments: Vec<&str> = Vec::new();
        for segment in path.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        format!("/{}", segments.join("/"))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if this is the root of its scheme and authority.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Iterates over the path segments, root excluded.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Returns the last path segment, or an empty string for the root.
    pub fn basename(&self) -> &str {
        self.segments().last().unwrap_or("")
    }

    /// Returns the parent resource. The root is its own parent.
    pub fn parent(&self) -> ResourceUri {
        let parent_path = match self.path.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &self.path[..idx],
        };
        Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: parent_path.to_string(),
        }
    }

    /// Appends a `/`-separated relative path to this resource.
    pub fn join(&self, relative: &str) -> ResourceUri {
        if relative.is_empty() {
            return self.clone();
        }
        Self::new(
            self.scheme.clone(),
            self.authority.clone(),
            &format!("{}/{}", self.path, relative),
        )
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.path)
    }
}

impl From<&str> for ResourceUri {
    fn from(s: &str) -> Self {
        ResourceUri::parse(s)
    }
}

impl From<String> for ResourceUri {
    fn from(s: String) -> Self {
        ResourceUri::parse(&s)
    }
}

impl Serialize for ResourceUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ResourceUri::parse(&raw))
    }
}

/// Compares and relates resources under a provider's path-case rules.
///
/// Scheme and authority always compare ignoring ASCII case. Path segments
/// compare exactly, or ignoring case when `ignore_path_case` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriComparer {
    ignore_path_case: bool,
}

impl UriComparer {
    /// Exact path comparison.
    pub const CASE_SENSITIVE: Self = Self { ignore_path_case: false };
    /// Case-folding path comparison.
    pub const IGNORE_PATH_CASE: Self = Self { ignore_path_case: true };

    pub fn new(ignore_path_case: bool) -> Self {
        Self { ignore_path_case }
    }

    pub fn ignores_path_case(&self) -> bool {
        self.ignore_path_case
    }

    /// Compares two individual path segments.
    pub fn segment_eq(&self, a: &str, b: &str) -> bool {
        if self.ignore_path_case {
            a == b || a.to_lowercase() == b.to_lowercase()
        } else {
            a == b
        }
    }

    fn same_origin(&self, a: &ResourceUri, b: &ResourceUri) -> bool {
        a.scheme.eq_ignore_ascii_case(&b.scheme) && a.authority.eq_ignore_ascii_case(&b.authority)
    }

    pub fn is_equal(&self, a: &ResourceUri, b: &ResourceUri) -> bool {
        self.same_origin(a, b)
            && a.segments().count() == b.segments().count()
            && a.segments().zip(b.segments()).all(|(x, y)| self.segment_eq(x, y))
    }

    /// Returns true if `candidate` equals `base` or lies below it.
    pub fn is_equal_or_parent(&self, candidate: &ResourceUri, base: &ResourceUri) -> bool {
        self.relative_path(base, candidate).is_some()
    }

    /// Returns the path of `to` relative to `from`.
    ///
    /// The result is empty when both are equal and `None` when `to` is not
    /// inside `from`. Segments keep the casing of `to`.
    pub fn relative_path(&self, from: &ResourceUri, to: &ResourceUri) -> Option<String> {
        if !self.same_origin(from, to) {
            return None;
        }
        let mut remaining = to.segments();
        for base_segment in from.segments() {
            match remaining.next() {
                Some(segment) if self.segment_eq(base_segment, segment) => {}
                _ => return None,
            }
        }
        Some(remaining.collect::<Vec<_>>().join("/"))
    }
}

impl Default for UriComparer {
    fn default() -> Self {
        Self::IGNORE_PATH_CASE
    }
}
