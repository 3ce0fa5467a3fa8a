//! nginx rewrite rule rendering.
//!
//! Page rules have the shape
//!
//! ```text
//! location ~ ^/blog/[^/]+?/?$ {
//!   expires 1h;
//!   rewrite ^/blog/[^/]+?/?$ /blog/[id].html break;
//! }
//! ```
//!
//! and are emitted highest priority first, separated by one blank line. nginx
//! evaluates regex locations in file order, so the first matching block wins.

use std::fmt;

use crate::pattern::BasePath;

/// Indentation of lines inside a block.
const INDENT: &str = "  ";

/// Separator between rendered blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Error parsing a rendered rule block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// Input contains no lines.
    #[error("rule block is empty")]
    Empty,
    /// First line is not `location ~ <pattern> {`.
    #[error("invalid location line: {0:?}")]
    Location(String),
    /// Last line is not `}`.
    #[error("rule block is not terminated by \"}}\"")]
    Unterminated,
    /// No rewrite line before the closing brace.
    #[error("rule block has no rewrite line")]
    MissingRewrite,
    /// Rewrite line does not have the expected shape.
    #[error("invalid rewrite line: {0:?}")]
    Rewrite(String),
    /// Directive line is not indented.
    #[error("invalid directive line: {0:?}")]
    Directive(String),
}

/// Rewrite rule for one page route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pattern: String,
    artifact: String,
    directives: Vec<String>,
}

impl RewriteRule {
    /// Create a rule rewriting requests matching `pattern` to `artifact`.
    pub fn new(pattern: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            artifact: artifact.into(),
            directives: Vec::new(),
        }
    }

    /// Add directive lines placed before the rewrite.
    #[must_use]
    pub fn with_directives(mut self, directives: Vec<String>) -> Self {
        self.directives = directives;
        self
    }

    /// Location and rewrite regex.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Exported HTML path requests are rewritten to.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Supplemental directive lines.
    #[must_use]
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Render the rule as an nginx `location` block.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Parse a block produced by [`RewriteRule::render`].
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(block: &str) -> Result<Self, RuleParseError> {
        let mut lines = block.trim().lines();

        let location = lines.next().ok_or(RuleParseError::Empty)?;
        if location.is_empty() {
            return Err(RuleParseError::Empty);
        }
        let pattern = location
            .strip_prefix("location ~ ")
            .and_then(|rest| rest.strip_suffix(" {"))
            .ok_or_else(|| RuleParseError::Location(location.to_owned()))?;

        let mut body: Vec<&str> = lines.collect();
        if body.pop() != Some("}") {
            return Err(RuleParseError::Unterminated);
        }
        let rewrite = body.pop().ok_or(RuleParseError::MissingRewrite)?;
        let artifact = rewrite
            .strip_prefix(INDENT)
            .and_then(|line| line.strip_prefix("rewrite "))
            .and_then(|line| line.strip_prefix(pattern))
            .and_then(|line| line.strip_prefix(' '))
            .and_then(|line| line.strip_suffix(" break;"))
            .filter(|artifact| !artifact.is_empty())
            .ok_or_else(|| RuleParseError::Rewrite(rewrite.to_owned()))?;

        let directives = body
            .into_iter()
            .map(|line| {
                line.strip_prefix(INDENT)
                    .map(str::to_owned)
                    .ok_or_else(|| RuleParseError::Directive(line.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pattern: pattern.to_owned(),
            artifact: artifact.to_owned(),
            directives,
        })
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "location ~ {} {{", self.pattern)?;
        for directive in &self.directives {
            writeln!(f, "{INDENT}{directive}")?;
        }
        writeln!(f, "{INDENT}rewrite {} {} break;", self.pattern, self.artifact)?;
        f.write_str("}")
    }
}

/// Join rendered rules with one blank line between blocks.
#[must_use]
pub fn render_rules(rules: &[RewriteRule]) -> String {
    rules
        .iter()
        .map(RewriteRule::render)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Render the catch-all block for non-page assets.
///
/// Strips `base_path` from any request no page rule matched, so files such as
/// `/docs/_next/static/app.js` resolve to `/_next/static/app.js` in the
/// export directory. Belongs after every page rule.
#[must_use]
pub fn render_fallback(base_path: &BasePath) -> String {
    format!("location / {{\n{INDENT}rewrite ^{base_path}/(.*)$ /$1 break;\n}}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_without_directives() {
        let rule = RewriteRule::new("^/blog/[^/]+?/?$", "/blog/[id].html");
        assert_eq!(
            rule.render(),
            "location ~ ^/blog/[^/]+?/?$ {\n  rewrite ^/blog/[^/]+?/?$ /blog/[id].html break;\n}"
        );
    }

    #[test]
    fn test_render_with_directives() {
        let rule = RewriteRule::new("^/posts/?$", "/posts/index.html").with_directives(vec![
            "expires 1h;".to_owned(),
            "add_header X-Page posts;".to_owned(),
        ]);
        assert_eq!(
            rule.render(),
            "\
location ~ ^/posts/?$ {
  expires 1h;
  add_header X-Page posts;
  rewrite ^/posts/?$ /posts/index.html break;
}"
        );
    }

    #[test]
    fn test_render_rules_separated_by_blank_line() {
        let rules = vec![
            RewriteRule::new("^/?$", "/index.html"),
            RewriteRule::new("^/about/?$", "/about.html"),
        ];
        assert_eq!(
            render_rules(&rules),
            "\
location ~ ^/?$ {
  rewrite ^/?$ /index.html break;
}

location ~ ^/about/?$ {
  rewrite ^/about/?$ /about.html break;
}"
        );
    }

    #[test]
    fn test_render_rules_empty() {
        assert_eq!(render_rules(&[]), "");
    }

    #[test]
    fn test_render_fallback() {
        assert_eq!(
            render_fallback(&BasePath::default()),
            "location / {\n  rewrite ^/(.*)$ /$1 break;\n}"
        );
        assert_eq!(
            render_fallback(&BasePath::new("/docs").unwrap()),
            "location / {\n  rewrite ^/docs/(.*)$ /$1 break;\n}"
        );
    }

    #[test]
    fn test_parse_recovers_rendered_rule() {
        let rule = RewriteRule::new("^/docs/blog/[^/]+?/?$", "/blog/[id]/index.html")
            .with_directives(vec!["expires 1h;".to_owned()]);
        assert_eq!(RewriteRule::parse(&rule.render()).unwrap(), rule);

        let bare = RewriteRule::new("^/?$", "/index.html");
        assert_eq!(RewriteRule::parse(&bare.render()).unwrap(), bare);
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        let block = "\n\nlocation ~ ^/a/?$ {\n  rewrite ^/a/?$ /a.html break;\n}\n";
        let rule = RewriteRule::parse(block).unwrap();
        assert_eq!(rule.pattern(), "^/a/?$");
        assert_eq!(rule.artifact(), "/a.html");
        assert!(rule.directives().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(RewriteRule::parse("  "), Err(RuleParseError::Empty));
        assert!(matches!(
            RewriteRule::parse("location / {\n  rewrite ^/(.*)$ /$1 break;\n}"),
            Err(RuleParseError::Location(_))
        ));
        assert_eq!(
            RewriteRule::parse("location ~ ^/a/?$ {\n  rewrite ^/a/?$ /a.html break;"),
            Err(RuleParseError::Unterminated)
        );
        assert_eq!(
            RewriteRule::parse("location ~ ^/a/?$ {\n}"),
            Err(RuleParseError::MissingRewrite)
        );
        assert!(matches!(
            RewriteRule::parse("location ~ ^/a/?$ {\n  rewrite ^/b/?$ /a.html break;\n}"),
            Err(RuleParseError::Rewrite(_))
        ));
        assert!(matches!(
            RewriteRule::parse(
                "location ~ ^/a/?$ {\nexpires 1h;\n  rewrite ^/a/?$ /a.html break;\n}"
            ),
            Err(RuleParseError::Directive(_))
        ));
    }
}
