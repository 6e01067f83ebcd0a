//! Content renderers for matilda.
//!
//! A content file is anything that can produce an HTML fragment: a plain
//! `.html` file passed through verbatim, or an executable script whose
//! captured stdout becomes the fragment. Each style is a [`ContentRenderer`]
//! implementation; the [`RendererRegistry`] maps file extensions to renderers
//! and doubles as the content filter during site discovery.

pub mod html;
pub mod markdown;
pub mod registry;
pub mod script;
pub mod traits;

pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use registry::RendererRegistry;
pub use script::ScriptRenderer;
pub use traits::{ContentRenderer, RenderError};
