//! CLI error types.

use ssg_rewrite_config::ConfigError;
use ssg_rewrite_pages::ScanError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
