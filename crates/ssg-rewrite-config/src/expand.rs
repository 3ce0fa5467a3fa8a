//! Variable expansion for path-like config values.
//!
//! `pagesDirPath` accepts `~` for the home directory plus `${VAR}` and
//! `${VAR:-default}`. `basePath` is a URL prefix, so only variables expand.

use std::borrow::Cow;
use std::env::VarError;
use std::path::PathBuf;

use crate::ConfigError;

/// Config fields that accept variable references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpandField {
    PagesDirPath,
    BasePath,
}

impl ExpandField {
    /// JSON key of the field.
    fn key(self) -> &'static str {
        match self {
            Self::PagesDirPath => "pagesDirPath",
            Self::BasePath => "basePath",
        }
    }
}

/// Expand `value` according to the rules of `field`.
pub(crate) fn expand(field: ExpandField, value: &str) -> Result<String, ConfigError> {
    let lookup = |var: &str| std::env::var(var).map(Some);

    let expanded = match field {
        ExpandField::PagesDirPath => shellexpand::full_with_context(
            value,
            || home_dir().and_then(|p| p.into_os_string().into_string().ok()),
            lookup,
        ),
        ExpandField::BasePath => shellexpand::env_with_context(value, lookup),
    };

    expanded.map(Cow::into_owned).map_err(|e| {
        let message = match e.cause {
            VarError::NotPresent => format!("${{{}}} not set", e.var_name),
            VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
        };
        ConfigError::EnvVar {
            field: field.key().to_owned(),
            message,
        }
    })
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_dir_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SSG_REWRITE_TEST_SITE", "/srv/site");
        }
        let result = expand(ExpandField::PagesDirPath, "${SSG_REWRITE_TEST_SITE}/pages").unwrap();
        assert_eq!(result, "/srv/site/pages");
        unsafe {
            std::env::remove_var("SSG_REWRITE_TEST_SITE");
        }
    }

    #[test]
    fn test_pages_dir_home() {
        let Some(home) = home_dir() else {
            return;
        };
        let result = expand(ExpandField::PagesDirPath, "~/site/pages").unwrap();
        assert_eq!(result, format!("{}/site/pages", home.display()));
    }

    #[test]
    fn test_base_path_keeps_tilde() {
        let result = expand(ExpandField::BasePath, "~docs").unwrap();
        assert_eq!(result, "~docs");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SSG_REWRITE_UNSET_BASE");
        }
        let result = expand(ExpandField::BasePath, "${SSG_REWRITE_UNSET_BASE:-/docs}").unwrap();
        assert_eq!(result, "/docs");
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SSG_REWRITE_MISSING");
        }
        let err = expand(ExpandField::BasePath, "${SSG_REWRITE_MISSING}").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("${SSG_REWRITE_MISSING} not set"));
        assert!(err.to_string().contains("basePath"));
    }

    #[test]
    fn test_literal_unchanged() {
        let result = expand(ExpandField::PagesDirPath, "src/pages").unwrap();
        assert_eq!(result, "src/pages");
    }
}
