//! Trait definitions for content renderers.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Produces the HTML fragment for one content file.
///
/// A renderer receives the content file's own path and returns the inner
/// HTML that gets composed into the page template. Renderers are trusted to
/// return usable text; no validation or sandboxing is applied.
pub trait ContentRenderer: Send + Sync {
    /// Renderer identifier (e.g. "html", "script").
    fn name(&self) -> &'static str;

    /// File extensions this renderer claims by default.
    fn extensions(&self) -> &[&'static str];

    /// Render the content file at `path` into an HTML fragment.
    fn render(&self, path: &Path) -> Result<String, RenderError>;
}

/// Errors that can occur while rendering a content file.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to run {path}: {source}")]
    Spawn { path: PathBuf, source: io::Error },

    #[error("{path} exited with {status}: {stderr}")]
    ScriptFailed {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{path} produced non-UTF-8 output")]
    InvalidOutput { path: PathBuf },
}
