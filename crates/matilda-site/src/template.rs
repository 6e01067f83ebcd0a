//! Page templates and fragment composition.
//!
//! Two template styles are supported, matching the two layouts a site's
//! `templates/` directory may use: a single `index.html` carrying a
//! `{{main}}` placeholder, or a `header.html`/`footer.html` pair that is
//! concatenated around the fragment with newlines.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Page template file, used in placeholder mode when present.
pub const PAGE_TEMPLATE: &str = "index.html";
/// Header half of the pair mode.
pub const HEADER_TEMPLATE: &str = "header.html";
/// Footer half of the pair mode.
pub const FOOTER_TEMPLATE: &str = "footer.html";

/// Wrapper text a rendered fragment is inserted into.
#[derive(Debug, Clone)]
pub enum Template {
    /// `header.html` + `footer.html` joined around the fragment.
    HeaderFooter { header: String, footer: String },

    /// Single page template, pre-split at the first placeholder.
    Page { before: String, after: String },
}

/// Errors that can occur while loading templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template {name}: {source}")]
    Read { name: String, source: io::Error },

    #[error("no template in {0}: expected index.html, or header.html and footer.html")]
    NotFound(String),

    #[error("template index.html has no {{{{main}}}} placeholder")]
    MissingPlaceholder,
}

impl Template {
    /// Load the template(s) from a directory, once per build.
    ///
    /// `index.html` takes priority and selects placeholder mode; otherwise
    /// the header/footer pair is read. Any read failure is fatal.
    pub fn load(templates_dir: &Path) -> Result<Self, TemplateError> {
        let page = templates_dir.join(PAGE_TEMPLATE);
        if page.exists() {
            let source = read_template(&page, PAGE_TEMPLATE)?;
            return Self::from_page_source(&source);
        }

        let header_path = templates_dir.join(HEADER_TEMPLATE);
        let footer_path = templates_dir.join(FOOTER_TEMPLATE);
        if !header_path.exists() && !footer_path.exists() {
            return Err(TemplateError::NotFound(
                templates_dir.display().to_string(),
            ));
        }

        Ok(Template::HeaderFooter {
            header: read_template(&header_path, HEADER_TEMPLATE)?,
            footer: read_template(&footer_path, FOOTER_TEMPLATE)?,
        })
    }

    /// Build a placeholder-mode template, splitting `source` at the first
    /// occurrence of the placeholder token.
    pub fn from_page_source(source: &str) -> Result<Self, TemplateError> {
        // Match: {{main}} with one optional non-word character on either
        // side of the word, e.g. {{ main }}
        static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"\{\{\W?main\W?\}\}").expect("Invalid placeholder regex")
        });

        match PLACEHOLDER_RE.find(source) {
            Some(found) => Ok(Template::Page {
                before: source[..found.start()].to_string(),
                after: source[found.end()..].to_string(),
            }),
            None => Err(TemplateError::MissingPlaceholder),
        }
    }

    /// Compose the final page text around a rendered fragment.
    ///
    /// The fragment is inserted literally: placeholder tokens inside it are
    /// not substituted again.
    pub fn compose(&self, fragment: &str) -> String {
        match self {
            Template::HeaderFooter { header, footer } => {
                format!("{header}\n{fragment}\n{footer}")
            }
            Template::Page { before, after } => format!("{before}{fragment}{after}"),
        }
    }
}

fn read_template(path: &Path, name: &str) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|e| TemplateError::Read {
        name: name.to_string(),
        source: e,
    })
}
