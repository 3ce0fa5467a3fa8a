//! Page source discovery.
//!
//! Walks a Pages Router `pages/` directory and turns every page source file
//! into a [`Route`](ssg_rewrite_core::Route). See [`PageScanner`].

mod scanner;

pub use scanner::{PageScanner, ScanError};
