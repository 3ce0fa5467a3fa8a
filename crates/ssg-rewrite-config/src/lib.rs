//! Configuration management for ssg-rewrite.
//!
//! Parses `ssg-rewrite.json` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Keys use the
//! camelCase names of `next.config.js` where one exists:
//!
//! ```json
//! {
//!   "pagesDirPath": "src/pages",
//!   "ignoredRoutes": ["/admin"],
//!   "basePath": "/docs",
//!   "trailingSlash": true,
//!   "assetFallback": true,
//!   "nginxConfigs": [
//!     { "pattern": "^/blog", "directives": ["expires 1h;"] }
//!   ]
//! }
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `pagesDirPath` and `basePath` support `${VAR}` and `${VAR:-default}`.
//! `pagesDirPath` also expands a leading `~` to the home directory.

mod expand;

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use ssg_rewrite_core::{BasePath, DirectiveRule, DirectiveTable, Route, RuleGenerator};

use crate::expand::ExpandField;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "ssg-rewrite.json";

/// Pages directories tried, relative to the working directory, when none is
/// configured.
const PAGES_DIR_CANDIDATES: [&str; 2] = ["pages", "src/pages"];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override pages directory (relative to the working directory).
    pub pages_dir: Option<PathBuf>,
    /// Override base path.
    pub base_path: Option<String>,
    /// Override trailing slash layout.
    pub trailing_slash: Option<bool>,
    /// Override asset fallback block.
    pub asset_fallback: Option<bool>,
}

/// Raw configuration as parsed from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    pages_dir_path: Option<String>,
    ignored_routes: Vec<String>,
    base_path: Option<String>,
    trailing_slash: Option<bool>,
    asset_fallback: Option<bool>,
    nginx_configs: Vec<RawNginxConfig>,
}

/// Raw supplemental directive entry.
#[derive(Debug, Deserialize)]
struct RawNginxConfig {
    pattern: String,
    #[serde(default)]
    directives: Vec<String>,
}

/// Resolved, validated configuration.
#[derive(Debug)]
pub struct Config {
    /// Absolute pages directory.
    pub pages_dir: PathBuf,
    /// Routes excluded from rule generation.
    pub ignored_routes: Vec<Route>,
    /// URL prefix the export is served under.
    pub base_path: BasePath,
    /// Whether the export uses `<route>/index.html` files.
    pub trailing_slash: bool,
    /// Whether to emit the asset fallback block after page rules.
    pub asset_fallback: bool,
    /// Supplemental directives by route pattern.
    pub directives: DirectiveTable,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g., "pagesDirPath").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
    /// Configured pages directory is missing or not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// No pages directory configured and none of the defaults exist.
    #[error(
        "\"pages\" directory is not found. Please try to specify \"pagesDirPath\" config."
    )]
    PagesDirNotFound,
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ssg-rewrite.json` in the current directory and
    /// parents, falling back to defaults when none exists.
    ///
    /// CLI settings take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// validation fails, or no pages directory can be resolved.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;

        let config_path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_config(&cwd),
        };

        let raw = match &config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                RawConfig::from_file(path)?
            }
            None => RawConfig::default(),
        };

        Self::from_raw(raw, config_path, &cwd, cli_settings.unwrap_or(&CliSettings::default()))
    }

    /// Rule generator configured with this config's settings.
    #[must_use]
    pub fn generator(&self) -> RuleGenerator {
        RuleGenerator::new()
            .with_base_path(self.base_path.clone())
            .with_trailing_slash(self.trailing_slash)
            .with_ignored_routes(self.ignored_routes.clone())
            .with_directives(self.directives.clone())
    }

    /// Search for config file in the given directory and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Build validated configuration from raw values.
    ///
    /// Relative `pagesDirPath` resolves against the config file's directory,
    /// relative CLI paths against `cwd`.
    fn from_raw(
        raw: RawConfig,
        config_path: Option<PathBuf>,
        cwd: &Path,
        settings: &CliSettings,
    ) -> Result<Self, ConfigError> {
        let base_path = match &settings.base_path {
            Some(base_path) => base_path.clone(),
            None => match &raw.base_path {
                Some(base_path) => expand::expand(ExpandField::BasePath, base_path)?,
                None => String::new(),
            },
        };
        let base_path = BasePath::new(base_path)
            .map_err(|e| ConfigError::Validation(format!("basePath: {e}")))?;

        let ignored_routes = raw
            .ignored_routes
            .iter()
            .map(|route| {
                Route::parse(route)
                    .map_err(|e| ConfigError::Validation(format!("ignoredRoutes: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let directives = raw
            .nginx_configs
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let pattern = Regex::new(&entry.pattern).map_err(|e| {
                    ConfigError::Validation(format!(
                        "nginxConfigs[{i}].pattern is not a valid regular expression: {e}"
                    ))
                })?;
                Ok(DirectiveRule::new(pattern, entry.directives))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let configured_pages_dir = match (&settings.pages_dir, &raw.pages_dir_path) {
            (Some(dir), _) => Some(cwd.join(dir)),
            (None, Some(dir)) => {
                let dir = expand::expand(ExpandField::PagesDirPath, dir)?;
                let config_dir = config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(cwd);
                Some(config_dir.join(dir))
            }
            (None, None) => None,
        };
        let pages_dir = resolve_pages_dir(configured_pages_dir, cwd)?;

        Ok(Self {
            pages_dir,
            ignored_routes,
            base_path,
            trailing_slash: settings
                .trailing_slash
                .or(raw.trailing_slash)
                .unwrap_or(false),
            asset_fallback: settings
                .asset_fallback
                .or(raw.asset_fallback)
                .unwrap_or(false),
            directives: DirectiveTable::new(directives),
            config_path,
        })
    }
}

impl RawConfig {
    /// Read and parse a config file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Resolve the pages directory.
///
/// A configured directory must exist. Without one, `pages/` and then
/// `src/pages/` under `cwd` are tried.
fn resolve_pages_dir(configured: Option<PathBuf>, cwd: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = configured {
        if !dir.is_dir() {
            return Err(ConfigError::NotADirectory(dir));
        }
        return Ok(dir);
    }

    PAGES_DIR_CANDIDATES
        .iter()
        .map(|candidate| cwd.join(candidate))
        .find(|dir| dir.is_dir())
        .ok_or(ConfigError::PagesDirNotFound)
}
