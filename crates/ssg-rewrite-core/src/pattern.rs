//! Match pattern and exported artifact path derivation.

use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::route::Route;

/// Any bracketed dynamic segment.
static DYNAMIC_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^/]+?\]").unwrap());

/// Regex atom matching one non-empty path component.
pub const DYNAMIC_SEGMENT_PATTERN: &str = "[^/]+?";

/// Exported HTML file for the root route.
pub const ROOT_ARTIFACT: &str = "/index.html";

/// Base path error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BasePathError {
    /// Non-empty base path without a leading slash.
    #[error("base path {0:?} must start with \"/\"")]
    MissingLeadingSlash(String),
    /// Base path ending with a slash.
    #[error("base path {0:?} must not end with \"/\"")]
    TrailingSlash(String),
    /// Base path containing whitespace, which would break the nginx directive.
    #[error("base path {0:?} must not contain whitespace")]
    Whitespace(String),
}

/// URL prefix the site is served under (`basePath` in `next.config.js`).
///
/// Either empty or `/`-prefixed without a trailing slash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Validate and wrap a base path.
    pub fn new(base_path: impl Into<String>) -> Result<Self, BasePathError> {
        let base_path = base_path.into();
        if base_path.is_empty() {
            return Ok(Self(base_path));
        }
        if !base_path.starts_with('/') {
            return Err(BasePathError::MissingLeadingSlash(base_path));
        }
        if base_path.ends_with('/') {
            return Err(BasePathError::TrailingSlash(base_path));
        }
        if base_path.chars().any(char::is_whitespace) {
            return Err(BasePathError::Whitespace(base_path));
        }
        Ok(Self(base_path))
    }

    /// Base path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the site is served from the domain root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the regex matching every request path served by `route`.
///
/// Dynamic segments become [`DYNAMIC_SEGMENT_PATTERN`] and an optional
/// trailing slash is accepted, so the rule does not depend on how the server
/// normalizes trailing slashes. Static text is inserted as-is.
#[must_use]
pub fn match_pattern(route: &Route, base_path: &BasePath) -> String {
    let path = format!("{base_path}{route}");
    let path = DYNAMIC_SEGMENT_RE.replace_all(&path, NoExpand(DYNAMIC_SEGMENT_PATTERN));
    format!("^{path}/?$")
}

/// Path of the HTML file a static export writes for `route`.
///
/// Mirrors the `trailingSlash` option of `next.config.js`: `/about` is
/// exported as `/about/index.html` when enabled and `/about.html` otherwise.
#[must_use]
pub fn artifact_path(route: &Route, trailing_slash: bool) -> String {
    if route.is_root() {
        ROOT_ARTIFACT.to_owned()
    } else if trailing_slash {
        format!("{route}/index.html")
    } else {
        format!("{route}.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: &str) -> Route {
        Route::parse(s).unwrap()
    }

    #[test]
    fn test_match_pattern_root() {
        assert_eq!(match_pattern(&Route::root(), &BasePath::default()), "^/?$");
    }

    #[test]
    fn test_match_pattern_dynamic_segment() {
        assert_eq!(
            match_pattern(&route("/blog/[id]"), &BasePath::default()),
            "^/blog/[^/]+?/?$"
        );
    }

    #[test]
    fn test_match_pattern_multiple_dynamic_segments() {
        assert_eq!(
            match_pattern(&route("/apples/[ab]/[cd]/ef"), &BasePath::default()),
            "^/apples/[^/]+?/[^/]+?/ef/?$"
        );
    }

    #[test]
    fn test_match_pattern_with_base_path() {
        let base = BasePath::new("/docs").unwrap();
        assert_eq!(match_pattern(&Route::root(), &base), "^/docs/?$");
        assert_eq!(
            match_pattern(&route("/posts/[id]"), &base),
            "^/docs/posts/[^/]+?/?$"
        );
    }

    #[test]
    fn test_match_pattern_matches_requests() {
        let pattern = Regex::new(&match_pattern(&route("/blog/[id]"), &BasePath::default()))
            .unwrap();
        assert!(pattern.is_match("/blog/42"));
        assert!(pattern.is_match("/blog/42/"));
        assert!(!pattern.is_match("/blog/"));
        assert!(!pattern.is_match("/blog/42/comments"));
    }

    #[test]
    fn test_artifact_path_root() {
        assert_eq!(artifact_path(&Route::root(), true), "/index.html");
        assert_eq!(artifact_path(&Route::root(), false), "/index.html");
    }

    #[test]
    fn test_artifact_path_trailing_slash() {
        assert_eq!(
            artifact_path(&route("/blog/[id]"), true),
            "/blog/[id]/index.html"
        );
    }

    #[test]
    fn test_artifact_path_without_trailing_slash() {
        assert_eq!(artifact_path(&route("/blog/[id]"), false), "/blog/[id].html");
    }

    #[test]
    fn test_base_path_validation() {
        assert!(BasePath::new("").unwrap().is_empty());
        assert_eq!(BasePath::new("/docs").unwrap().as_str(), "/docs");
        assert_eq!(
            BasePath::new("docs").unwrap_err(),
            BasePathError::MissingLeadingSlash("docs".to_owned())
        );
        assert_eq!(
            BasePath::new("/docs/").unwrap_err(),
            BasePathError::TrailingSlash("/docs/".to_owned())
        );
        assert!(matches!(
            BasePath::new("/my docs"),
            Err(BasePathError::Whitespace(_))
        ));
    }
}
