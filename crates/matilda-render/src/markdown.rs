//! Markdown renderer.

use std::fs;
use std::path::Path;

use pulldown_cmark::{html, Options, Parser};

use crate::traits::{ContentRenderer, RenderError};

/// Renders `.md` content files to HTML.
///
/// Not part of the stock registry: the default content filter admits only
/// `.html` and script files. Register this renderer to opt markdown pages in.
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl ContentRenderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &[&'static str] {
        &["md"]
    }

    fn render(&self, path: &Path) -> Result<String, RenderError> {
        let source = fs::read_to_string(path).map_err(|e| RenderError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let parser = Parser::new_ext(&source, options);

        let mut fragment = String::new();
        html::push_html(&mut fragment, parser);

        Ok(fragment)
    }
}
