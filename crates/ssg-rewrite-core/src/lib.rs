//! nginx rewrite rules for statically exported Next.js pages.
//!
//! A static export writes one HTML file per page, including pages with
//! dynamic segments (`/blog/[id].html`). This crate turns the page routes into
//! `location` blocks that rewrite request paths to those files, ordered the way
//! the Pages Router resolves routes so the first matching block is the page
//! Next.js would render.
//!
//! # Pipeline
//!
//! 1. [`Route::from_page_file`] normalizes page files into routes.
//! 2. [`filter_routes`] drops API routes, special pages, ignored routes and
//!    catch-all routes.
//! 3. [`sorted_by_priority`] orders routes by resolution priority.
//! 4. [`match_pattern`] and [`artifact_path`] derive the regex and target.
//! 5. [`RewriteRule`] renders the block, with directives from a
//!    [`DirectiveTable`].
//!
//! [`RuleGenerator`] runs steps 2–5. The crate performs no I/O.

mod directives;
mod filter;
mod generator;
mod nginx;
mod pattern;
mod priority;
mod route;

pub use directives::{DirectiveRule, DirectiveTable};
pub use filter::{API_ROUTE_SEGMENT, Exclusion, RESERVED_ROUTES, exclusion, filter_routes};
pub use generator::RuleGenerator;
pub use nginx::{BLOCK_SEPARATOR, RewriteRule, RuleParseError, render_fallback, render_rules};
pub use pattern::{
    BasePath, BasePathError, DYNAMIC_SEGMENT_PATTERN, ROOT_ARTIFACT, artifact_path, match_pattern,
};
pub use priority::{compare_priority, sort_by_priority, sorted_by_priority};
pub use route::{PAGE_EXTENSIONS, Route, RouteError, Segment};
