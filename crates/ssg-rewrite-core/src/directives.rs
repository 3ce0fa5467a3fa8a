//! Supplemental nginx directives attached to routes.
//!
//! Each [`DirectiveRule`] pairs a regex with directive lines. Every rule whose
//! regex matches a route contributes its directives, in the order the rules
//! were listed. Conflicting or repeated directives are passed through
//! untouched.

use regex::Regex;

use crate::route::Route;

/// Directive lines for routes matching a pattern.
#[derive(Debug, Clone)]
pub struct DirectiveRule {
    pattern: Regex,
    directives: Vec<String>,
}

impl DirectiveRule {
    /// Create a rule from an already validated pattern.
    #[must_use]
    pub fn new(pattern: Regex, directives: Vec<String>) -> Self {
        Self {
            pattern,
            directives,
        }
    }

    /// Pattern matched against the route string.
    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Directive lines added to matching routes.
    #[must_use]
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Whether the pattern matches anywhere in the route.
    ///
    /// The route string is matched, not the generated nginx pattern, so the
    /// root route is the empty string.
    #[must_use]
    pub fn matches(&self, route: &Route) -> bool {
        self.pattern.is_match(route.as_str())
    }
}

/// Ordered collection of [`DirectiveRule`]s.
#[derive(Debug, Clone, Default)]
pub struct DirectiveTable {
    rules: Vec<DirectiveRule>,
}

impl DirectiveTable {
    /// Create a table; rules are applied in the given order.
    #[must_use]
    pub fn new(rules: Vec<DirectiveRule>) -> Self {
        Self { rules }
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rules in listing order.
    #[must_use]
    pub fn rules(&self) -> &[DirectiveRule] {
        &self.rules
    }

    /// Directives of every matching rule, concatenated in listing order.
    #[must_use]
    pub fn directives_for(&self, route: &Route) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(route))
            .flat_map(|rule| rule.directives.iter().cloned())
            .collect()
    }
}
