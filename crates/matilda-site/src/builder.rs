//! Site builder.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use matilda_render::{ContentRenderer, RenderError, RendererRegistry};

use crate::assets;
use crate::slug::Slug;
use crate::template::{Template, TemplateError};

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content source directory
    pub content_dir: PathBuf,

    /// Static asset directory, copied into the output verbatim
    pub static_dir: PathBuf,

    /// Template directory
    pub templates_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Worker threads for page rendering (None = one per core)
    pub workers: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("public"),
            workers: None,
        }
    }
}

/// Errors that can occur during a build.
///
/// Setup errors (clearing, static copy, discovery, templates) abort the
/// build. Render and write errors are per-page: they are collected into the
/// report's outcomes instead of being returned from [`SiteBuilder::build`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to clear {path}: {source}")]
    Clear { path: PathBuf, source: io::Error },

    #[error("asset error: {0}")]
    Assets(#[from] assets::AssetError),

    #[error("content directory not found: {0}")]
    ContentDirNotFound(PathBuf),

    #[error("failed to scan content: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Result of rendering one content file.
#[derive(Debug)]
pub struct PageOutcome {
    /// Content source path
    pub source: PathBuf,

    /// Output path the page maps to
    pub output: PathBuf,

    /// Error message if the page failed to render or write
    pub error: Option<String>,
}

impl PageOutcome {
    /// Whether the page was written.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildReport {
    /// Per-page outcomes, one per discovered content file
    pub outcomes: Vec<PageOutcome>,

    /// Number of static files copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

impl BuildReport {
    /// Pages written successfully.
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Pages that failed to render or write.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    /// Whether every discovered page was written.
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }
}

/// A content file queued for rendering.
struct PageInfo {
    /// Source file path
    source: PathBuf,

    /// Relative path from the content root
    relative: PathBuf,

    /// Output path derived from the slug
    output: PathBuf,

    /// Renderer claimed by the file's extension
    renderer: Arc<dyn ContentRenderer>,
}

/// Assembles the output tree from content, templates, and static assets.
pub struct SiteBuilder {
    config: BuildConfig,
    registry: RendererRegistry,
}

impl SiteBuilder {
    /// Builder with the stock renderer registry (`.html` + `.js`).
    pub fn new(config: BuildConfig) -> Self {
        Self::with_registry(config, RendererRegistry::with_defaults())
    }

    /// Builder with a caller-supplied renderer registry.
    pub fn with_registry(config: BuildConfig, registry: RendererRegistry) -> Self {
        Self { config, registry }
    }

    /// Build the site.
    ///
    /// Steps run in a fixed order (clear output, copy static assets,
    /// discover content, load templates, render pages) and each step is a
    /// precondition for the next. Page rendering runs on a bounded worker
    /// pool with no ordering guarantee among pages; one page's failure does
    /// not stop the others.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        tracing::info!("Empty {}", self.config.output_dir.display());
        assets::clear_dir(&self.config.output_dir).map_err(|e| BuildError::Clear {
            path: self.config.output_dir.clone(),
            source: e,
        })?;

        tracing::info!(
            "Copy {} -> {}",
            self.config.static_dir.display(),
            self.config.output_dir.display()
        );
        let assets = assets::copy_tree(&self.config.static_dir, &self.config.output_dir)?;

        let pages = self.discover_pages()?;
        let template = Template::load(&self.config.templates_dir)?;

        let outcomes = self.render_pages(&pages, &template)?;

        Ok(BuildReport {
            outcomes,
            assets,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all content files the renderer registry claims.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        if !self.config.content_dir.exists() {
            return Err(BuildError::ContentDirNotFound(
                self.config.content_dir.clone(),
            ));
        }

        let mut pages = Vec::new();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.config.content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let Some(renderer) = self.registry.for_path(path) else {
                tracing::debug!("Skip {} (no renderer for extension)", path.display());
                continue;
            };

            let relative = path
                .strip_prefix(&self.config.content_dir)
                .unwrap_or(path)
                .to_path_buf();

            let slug = Slug::from_relative(&relative);
            let output = slug.output_path(&self.config.output_dir);

            // Writes are unguarded, so a collision means last-write-wins.
            if let Some(previous) = claimed.insert(output.clone(), path.to_path_buf()) {
                tracing::warn!(
                    "{} and {} both map to slug {}",
                    previous.display(),
                    path.display(),
                    slug
                );
            }

            pages.push(PageInfo {
                source: path.to_path_buf(),
                relative,
                output,
                renderer,
            });
        }

        Ok(pages)
    }

    /// Render all pages on a bounded worker pool.
    fn render_pages(
        &self,
        pages: &[PageInfo],
        template: &Template,
    ) -> Result<Vec<PageOutcome>, BuildError> {
        let render_all = || -> Vec<PageOutcome> {
            pages
                .par_iter()
                .map(|page| self.render_page(page, template))
                .collect()
        };

        match self.config.workers {
            Some(workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()?;
                Ok(pool.install(render_all))
            }
            None => Ok(render_all()),
        }
    }

    /// Render one page, reporting its outcome instead of failing the batch.
    fn render_page(&self, page: &PageInfo, template: &Template) -> PageOutcome {
        tracing::info!("Read {}", page.relative.display());

        let error = match self.render_and_write(page, template) {
            Ok(()) => {
                tracing::info!("Write {}", page.output.display());
                None
            }
            Err(e) => {
                tracing::error!("Failed to build {}: {}", page.relative.display(), e);
                Some(e.to_string())
            }
        };

        PageOutcome {
            source: page.source.clone(),
            output: page.output.clone(),
            error,
        }
    }

    fn render_and_write(&self, page: &PageInfo, template: &Template) -> Result<(), BuildError> {
        let fragment = page.renderer.render(&page.source)?;
        let html = template.compose(&fragment);

        if let Some(parent) = page.output.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::Write {
                path: page.output.clone(),
                source: e,
            })?;
        }

        fs::write(&page.output, html).map_err(|e| BuildError::Write {
            path: page.output.clone(),
            source: e,
        })
    }
}
