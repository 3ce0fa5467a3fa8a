//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod routes;

use std::path::PathBuf;

use clap::Args;
use ssg_rewrite_config::{CliSettings, Config};
use ssg_rewrite_core::Route;
use ssg_rewrite_pages::PageScanner;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use generate::GenerateArgs;
pub(crate) use routes::RoutesArgs;

/// Configuration options shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover ssg-rewrite.json).
    #[arg(short, long, env = "SSG_REWRITE_CONFIG")]
    config: Option<PathBuf>,

    /// Pages directory (overrides config).
    #[arg(short, long)]
    pages_dir: Option<PathBuf>,

    /// URL prefix the export is served under, e.g. /docs (overrides config).
    #[arg(long)]
    base_path: Option<String>,

    /// Export writes <route>/index.html files (overrides config).
    #[arg(long)]
    trailing_slash: bool,

    /// Export writes <route>.html files (overrides config).
    #[arg(long, conflicts_with = "trailing_slash")]
    no_trailing_slash: bool,
}

impl ConfigArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load(self, asset_fallback: Option<bool>) -> Result<Config, CliError> {
        let trailing_slash = self.resolve_trailing_slash();
        let cli_settings = CliSettings {
            pages_dir: self.pages_dir,
            base_path: self.base_path,
            trailing_slash,
            asset_fallback,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Resolve `trailing_slash` from --trailing-slash/--no-trailing-slash flags.
    fn resolve_trailing_slash(&self) -> Option<bool> {
        self.no_trailing_slash
            .then_some(false)
            .or(self.trailing_slash.then_some(true))
    }
}

/// Scan the configured pages directory for routes.
pub(crate) fn scan_routes(config: &Config, output: &Output) -> Result<Vec<Route>, CliError> {
    let routes = PageScanner::new(config.pages_dir.clone()).scan_routes()?;
    if routes.is_empty() {
        output.warning(&format!(
            "No pages found in {}",
            config.pages_dir.display()
        ));
    }
    Ok(routes)
}
