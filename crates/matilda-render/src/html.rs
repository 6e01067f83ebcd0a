//! Verbatim HTML renderer.

use std::fs;
use std::path::Path;

use crate::traits::{ContentRenderer, RenderError};

/// Renders `.html` content files by passing their text through unchanged.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl ContentRenderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extensions(&self) -> &[&'static str] {
        &["html"]
    }

    fn render(&self, path: &Path) -> Result<String, RenderError> {
        fs::read_to_string(path).map_err(|e| RenderError::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
