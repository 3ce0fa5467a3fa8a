//! `ssg-rewrite routes` command implementation.

use std::io::{self, Write};

use clap::Args;
use ssg_rewrite_core::Route;

use super::{ConfigArgs, scan_routes};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl RoutesArgs {
    /// Execute the routes command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(None)?;
        let routes = config
            .generator()
            .ordered_routes(scan_routes(&config, &output)?);

        let mut stdout = io::stdout().lock();
        for line in route_lines(&routes) {
            writeln!(stdout, "{line}")?;
        }
        Ok(())
    }
}

/// Display form of each route, with the root shown as `/`.
fn route_lines(routes: &[Route]) -> Vec<&str> {
    routes
        .iter()
        .map(|route| if route.is_root() { "/" } else { route.as_str() })
        .collect()
}
