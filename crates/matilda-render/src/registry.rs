//! Renderer registry mapping content extensions to renderers.
//!
//! The registry is consulted by site discovery as an allow-list: files whose
//! extension no renderer claims are not content and are skipped. Extensions
//! match the final path extension only, case-sensitively.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::html::HtmlRenderer;
use crate::script::ScriptRenderer;
use crate::traits::ContentRenderer;

/// Registry of content renderers keyed by file extension.
#[derive(Default, Clone)]
pub struct RendererRegistry {
    by_extension: HashMap<String, Arc<dyn ContentRenderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the stock renderers: verbatim HTML for `.html`,
    /// executable scripts for `.js`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlRenderer));
        registry.register(Arc::new(ScriptRenderer::new()));
        registry
    }

    /// Register a renderer under every extension it claims by default.
    pub fn register(&mut self, renderer: Arc<dyn ContentRenderer>) {
        for ext in renderer.extensions() {
            self.by_extension
                .insert((*ext).to_string(), Arc::clone(&renderer));
        }
    }

    /// Register a renderer for one specific extension, replacing any
    /// previous claim on it.
    pub fn register_extension(&mut self, extension: &str, renderer: Arc<dyn ContentRenderer>) {
        self.by_extension.insert(extension.to_string(), renderer);
    }

    /// Look up the renderer for a path by its extension.
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn ContentRenderer>> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        self.by_extension.get(ext).cloned()
    }

    /// Whether any renderer claims this extension.
    pub fn contains(&self, extension: &str) -> bool {
        self.by_extension.contains_key(extension)
    }

    /// All claimed extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownRenderer;
    use pretty_assertions::assert_eq;

    #[test]
    fn stock_registry_claims_html_and_js() {
        let registry = RendererRegistry::with_defaults();

        assert_eq!(registry.extensions(), vec!["html", "js"]);
        assert!(registry.contains("html"));
        assert!(registry.contains("js"));
        assert!(!registry.contains("txt"));
    }

    #[test]
    fn resolves_renderer_by_path_extension() {
        let registry = RendererRegistry::with_defaults();

        let renderer = registry.for_path(Path::new("content/about.html")).unwrap();
        assert_eq!(renderer.name(), "html");

        let renderer = registry.for_path(Path::new("content/feed.js")).unwrap();
        assert_eq!(renderer.name(), "script");

        assert!(registry.for_path(Path::new("content/notes.txt")).is_none());
        assert!(registry.for_path(Path::new("content/README")).is_none());
    }

    #[test]
    fn extension_matching_is_case_sensitive() {
        let registry = RendererRegistry::with_defaults();

        assert!(registry.for_path(Path::new("page.HTML")).is_none());
    }

    #[test]
    fn opt_in_renderer_extends_the_allow_list() {
        let mut registry = RendererRegistry::with_defaults();
        registry.register(Arc::new(MarkdownRenderer));

        assert_eq!(registry.extensions(), vec!["html", "js", "md"]);
        let renderer = registry.for_path(Path::new("post.md")).unwrap();
        assert_eq!(renderer.name(), "markdown");
    }

    #[test]
    fn explicit_claim_overrides_default() {
        let mut registry = RendererRegistry::with_defaults();
        registry.register_extension("js", Arc::new(HtmlRenderer));

        let renderer = registry.for_path(Path::new("inline.js")).unwrap();
        assert_eq!(renderer.name(), "html");
    }
}
