//! Page discovery by globbing the pages directory.
//!
//! Discovery is split in two phases: [`PageScanner::scan_files`] finds page
//! source files, [`PageScanner::scan_routes`] converts them to routes. Hidden
//! files and directories are skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use ssg_rewrite_core::{PAGE_EXTENSIONS, Route, RouteError};

/// Page discovery error.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The glob pattern built from the pages directory is invalid.
    #[error("Invalid page pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A directory entry could not be read.
    #[error("Failed to read pages directory: {0}")]
    Glob(#[from] glob::GlobError),
    /// A page file could not be converted to a route.
    #[error("{0}")]
    Route(#[from] RouteError),
}

/// Discovers page source files under a pages directory.
pub struct PageScanner {
    pages_dir: PathBuf,
}

impl PageScanner {
    /// Create a scanner for `pages_dir`.
    pub fn new(pages_dir: PathBuf) -> Self {
        Self { pages_dir }
    }

    /// Directory being scanned.
    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// Find page source files, sorted by path.
    ///
    /// Returns an empty Vec if the pages directory doesn't exist.
    pub fn scan_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let root = Pattern::escape(&self.pages_dir.to_string_lossy());

        let mut files = Vec::new();
        for ext in PAGE_EXTENSIONS {
            let pattern = format!("{root}/**/*.{ext}");
            for entry in glob::glob_with(&pattern, options)? {
                let path = entry?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();

        tracing::debug!(
            pages_dir = %self.pages_dir.display(),
            count = files.len(),
            "Page scan completed"
        );
        Ok(files)
    }

    /// Find pages and convert them to routes.
    ///
    /// Two files mapping to the same route (`about.tsx` and `about/index.tsx`)
    /// yield one route; the first file in path order wins.
    pub fn scan_routes(&self) -> Result<Vec<Route>, ScanError> {
        let mut seen = HashSet::new();
        let mut routes = Vec::new();

        for file in self.scan_files()? {
            let route = Route::from_page_file(&file, &self.pages_dir)?;
            if seen.insert(route.clone()) {
                routes.push(route);
            } else {
                tracing::warn!(
                    route = %route,
                    path = %file.display(),
                    "Duplicate page for route, skipping"
                );
            }
        }

        Ok(routes)
    }
}
