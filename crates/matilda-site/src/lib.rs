//! Site assembly for matilda.
//!
//! Turns a content tree, a static asset tree, and a template into a complete
//! output directory: clear the output, copy static files verbatim, then
//! render every content file into the template at its slug-derived location.

pub mod assets;
pub mod builder;
pub mod slug;
pub mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, PageOutcome, SiteBuilder};
pub use slug::Slug;
pub use template::{Template, TemplateError};
