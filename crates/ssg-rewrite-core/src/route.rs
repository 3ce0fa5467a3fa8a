//! Normalized page routes.
//!
//! A [`Route`] is the logical path of a page as the Pages Router sees it:
//! no file extension, no `/index` suffix, no base path and no trailing slash.
//! The root page is the empty route.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Page source file extensions.
pub const PAGE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

/// Route construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The page file does not live under the pages directory.
    #[error("{} is not under pages directory {}", path.display(), pages_dir.display())]
    OutsidePagesDir {
        /// Page file path.
        path: PathBuf,
        /// Pages directory.
        pages_dir: PathBuf,
    },
    /// The page file path is not valid UTF-8.
    #[error("Page path is not valid UTF-8: {}", .0.display())]
    NonUtf8(PathBuf),
    /// The route string violates a route invariant.
    #[error("Invalid route {route:?}: {reason}")]
    Invalid {
        /// Offending route string.
        route: String,
        /// Violated rule.
        reason: &'static str,
    },
}

/// Normalized logical page path.
///
/// Only constructed through [`Route::from_page_file`] or [`Route::parse`],
/// both of which validate the invariants, so downstream stages never see an
/// arbitrary string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    /// The root route (`pages/index.tsx`).
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Convert a page file under `pages_dir` into a route.
    ///
    /// Examples:
    /// - `pages/index.tsx` -> `""`
    /// - `pages/about.js` -> `"/about"`
    /// - `pages/blog/index.tsx` -> `"/blog"`
    /// - `pages/blog/[id].tsx` -> `"/blog/[id]"`
    ///
    /// Only one `/index` suffix is stripped, so `pages/index/index.tsx`
    /// becomes `"/index"`.
    pub fn from_page_file(path: &Path, pages_dir: &Path) -> Result<Self, RouteError> {
        let relative = path
            .strip_prefix(pages_dir)
            .map_err(|_| RouteError::OutsidePagesDir {
                path: path.to_path_buf(),
                pages_dir: pages_dir.to_path_buf(),
            })?;

        // Joined with '/' on every platform
        let mut joined = String::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| RouteError::NonUtf8(path.to_path_buf()))?;
                    joined.push('/');
                    joined.push_str(part);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(RouteError::Invalid {
                        route: relative.display().to_string(),
                        reason: "page path must not escape the pages directory",
                    });
                }
            }
        }

        let without_ext = strip_page_extension(&joined);
        let route = without_ext.strip_suffix("/index").unwrap_or(without_ext);

        // Dotted names such as `node.js.tsx` keep their inner extension
        validate_shape(route)?;
        Ok(Self(route.to_owned()))
    }

    /// Parse a route string supplied by a caller (e.g. an ignored route).
    ///
    /// `"/"` is accepted as the root route and normalized to `""`. Strings
    /// that page file normalization would never produce (a page extension,
    /// a trailing `/index`) are rejected.
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        if route == "/" {
            return Ok(Self::root());
        }
        validate_shape(route)?;
        let invalid = |reason| RouteError::Invalid {
            route: route.to_owned(),
            reason,
        };
        if strip_page_extension(route).len() != route.len() {
            return Err(invalid("must not carry a page file extension"));
        }
        if route.ends_with("/index") {
            return Err(invalid("must not end with \"/index\""));
        }
        Ok(Self(route.to_owned()))
    }

    /// Route as a string slice (`""` for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root route.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path segments without the leading slash. Empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.0.split('/').skip(1).map(Segment::classify)
    }

    /// Whether any segment is a dynamic segment of any kind.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.segments().any(|s| !matches!(s, Segment::Static(_)))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text: `about`
    Static(&'a str),
    /// Single-component parameter: `[id]`
    Dynamic(&'a str),
    /// Catch-all parameter: `[...slug]`
    CatchAll(&'a str),
    /// Optional catch-all parameter: `[[...slug]]`
    OptionalCatchAll(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify a segment. The parameter name is carried for dynamic kinds.
    ///
    /// Rules are evaluated in order:
    /// 1. `[[...name]]` optional catch-all
    /// 2. `[...name]` catch-all
    /// 3. `[name]` dynamic
    /// 4. anything else is static
    #[must_use]
    pub fn classify(segment: &'a str) -> Self {
        if let Some(name) = segment
            .strip_prefix("[[...")
            .and_then(|s| s.strip_suffix("]]"))
        {
            return Self::OptionalCatchAll(name);
        }
        if let Some(name) = segment
            .strip_prefix("[...")
            .and_then(|s| s.strip_suffix(']'))
        {
            return Self::CatchAll(name);
        }
        if let Some(name) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Self::Dynamic(name);
        }
        Self::Static(segment)
    }
}

/// Strip one recognized page extension from the last path segment.
fn strip_page_extension(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && PAGE_EXTENSIONS.contains(&ext) => stem,
        _ => path,
    }
}

/// Structural checks shared by both constructors.
fn validate_shape(route: &str) -> Result<(), RouteError> {
    let invalid = |reason| {
        Err(RouteError::Invalid {
            route: route.to_owned(),
            reason,
        })
    };

    if route.is_empty() {
        return Ok(());
    }
    if !route.starts_with('/') {
        return invalid("must start with \"/\"");
    }
    if route.ends_with('/') {
        return invalid("must not end with \"/\"");
    }
    if route.split('/').skip(1).any(str::is_empty) {
        return invalid("must not contain empty segments");
    }
    Ok(())
}
