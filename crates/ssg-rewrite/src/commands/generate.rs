//! `ssg-rewrite generate` command implementation.

use std::io::{self, Write};

use clap::Args;
use ssg_rewrite_config::Config;
use ssg_rewrite_core::{BLOCK_SEPARATOR, Route, render_fallback};

use super::{ConfigArgs, scan_routes};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Append a catch-all block that strips the base path from asset requests.
    #[arg(long)]
    fallback: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the pages directory cannot be
    /// scanned, or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(self.fallback.then_some(true))?;
        let routes = scan_routes(&config, &output)?;
        let text = render_output(&config, routes);

        if !text.is_empty() {
            writeln!(io::stdout().lock(), "{text}")?;
        }
        Ok(())
    }
}

/// Render page rules, followed by the asset fallback block when enabled.
fn render_output(config: &Config, routes: Vec<Route>) -> String {
    let mut text = config.generator().render(routes);
    if config.asset_fallback {
        if !text.is_empty() {
            text.push_str(BLOCK_SEPARATOR);
        }
        text.push_str(&render_fallback(&config.base_path));
    }
    text
}
