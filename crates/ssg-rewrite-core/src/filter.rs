//! Removal of routes that never get a rewrite rule.

use crate::route::{Route, Segment};

/// First segment of API routes (`pages/api/**`).
pub const API_ROUTE_SEGMENT: &str = "api";

/// Framework special pages and HTTP error pages.
pub const RESERVED_ROUTES: [&str; 5] = ["/_app", "/_document", "/_error", "/404", "/500"];

/// Why a route is excluded from rule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// API route, served by a function rather than an exported page.
    ApiRoute,
    /// Framework special page (`/_app`, `/404`, ...).
    Reserved,
    /// Listed in the ignored routes.
    Ignored,
    /// Contains a `[...name]` segment.
    CatchAll,
    /// Contains a `[[...name]]` segment.
    OptionalCatchAll,
}

/// Return why `route` is excluded, or `None` if it gets a rule.
#[must_use]
pub fn exclusion(route: &Route, ignored_routes: &[Route]) -> Option<Exclusion> {
    if route.segments().next() == Some(Segment::Static(API_ROUTE_SEGMENT)) {
        return Some(Exclusion::ApiRoute);
    }
    if RESERVED_ROUTES.contains(&route.as_str()) {
        return Some(Exclusion::Reserved);
    }
    if ignored_routes.contains(route) {
        return Some(Exclusion::Ignored);
    }
    route.segments().find_map(|segment| match segment {
        Segment::CatchAll(_) => Some(Exclusion::CatchAll),
        Segment::OptionalCatchAll(_) => Some(Exclusion::OptionalCatchAll),
        Segment::Static(_) | Segment::Dynamic(_) => None,
    })
}

/// Drop excluded routes, keeping the relative order of the rest.
#[must_use]
pub fn filter_routes(routes: Vec<Route>, ignored_routes: &[Route]) -> Vec<Route> {
    routes
        .into_iter()
        .filter(|route| match exclusion(route, ignored_routes) {
            Some(reason) => {
                tracing::debug!(route = %route, reason = ?reason, "Excluded route");
                false
            }
            None => true,
        })
        .collect()
}
