//! Route set to rewrite rules pipeline.

use crate::directives::DirectiveTable;
use crate::filter::filter_routes;
use crate::nginx::{RewriteRule, render_rules};
use crate::pattern::{BasePath, artifact_path, match_pattern};
use crate::priority::sorted_by_priority;
use crate::route::Route;

/// Generates ordered rewrite rules for a route set.
///
/// # Example
///
/// ```
/// use ssg_rewrite_core::{Route, RuleGenerator};
///
/// let routes = ["/", "/posts/[id]", "/posts"]
///     .into_iter()
///     .map(Route::parse)
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// let rules = RuleGenerator::new().with_trailing_slash(true).generate(routes);
/// let artifacts: Vec<_> = rules.iter().map(|r| r.artifact()).collect();
/// assert_eq!(
///     artifacts,
///     ["/index.html", "/posts/index.html", "/posts/[id]/index.html"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleGenerator {
    base_path: BasePath,
    trailing_slash: bool,
    ignored_routes: Vec<Route>,
    directives: DirectiveTable,
}

impl RuleGenerator {
    /// Create a generator with an empty base path and trailing slash disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path prefixed to every match pattern.
    #[must_use]
    pub fn with_base_path(mut self, base_path: BasePath) -> Self {
        self.base_path = base_path;
        self
    }

    /// Set the trailing-slash export layout.
    #[must_use]
    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Set routes excluded from generation.
    #[must_use]
    pub fn with_ignored_routes(mut self, ignored_routes: Vec<Route>) -> Self {
        self.ignored_routes = ignored_routes;
        self
    }

    /// Set supplemental directives.
    #[must_use]
    pub fn with_directives(mut self, directives: DirectiveTable) -> Self {
        self.directives = directives;
        self
    }

    /// Base path in use.
    #[must_use]
    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Filter and order routes, highest priority first.
    #[must_use]
    pub fn ordered_routes(&self, routes: Vec<Route>) -> Vec<Route> {
        let total = routes.len();
        let routes = sorted_by_priority(filter_routes(routes, &self.ignored_routes));
        tracing::debug!(total, kept = routes.len(), "Ordered routes");
        routes
    }

    /// Build one rule per kept route, highest priority first.
    #[must_use]
    pub fn generate(&self, routes: Vec<Route>) -> Vec<RewriteRule> {
        self.ordered_routes(routes)
            .iter()
            .map(|route| self.rule_for(route))
            .collect()
    }

    /// Build the rule for a single route, ignoring filtering.
    #[must_use]
    pub fn rule_for(&self, route: &Route) -> RewriteRule {
        RewriteRule::new(
            match_pattern(route, &self.base_path),
            artifact_path(route, self.trailing_slash),
        )
        .with_directives(self.directives.directives_for(route))
    }

    /// Generate and render rules as nginx configuration text.
    #[must_use]
    pub fn render(&self, routes: Vec<Route>) -> String {
        render_rules(&self.generate(routes))
    }
}
