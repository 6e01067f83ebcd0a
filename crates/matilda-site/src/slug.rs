//! Slug derivation from content paths.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Stem that maps a content file to the site root.
const ROOT_STEM: &str = "index";

/// URL-path-like identifier derived from a content file's relative path.
///
/// The slug is the relative path with its trailing extension stripped,
/// components joined with `/`. A slug whose whole value is `index` collapses
/// to the root slug (the empty string), so `content/index.html` becomes the
/// site's front page. Only the whole-path match collapses: `blog/index.html`
/// keeps the slug `blog/index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// The root slug.
    pub fn root() -> Self {
        Slug(String::new())
    }

    /// Derive the slug for a content file path relative to the content root.
    ///
    /// Strips exactly the trailing extension of the final component and
    /// nothing else (`guide.v2.html` → `guide.v2`).
    pub fn from_relative(relative: &Path) -> Self {
        let mut segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if let Some(last) = segments.last_mut() {
            if let Some(stem) = Path::new(last.as_str()).file_stem().and_then(|s| s.to_str()) {
                *last = stem.to_string();
            }
        }

        let slug = segments.join("/");
        if slug == ROOT_STEM {
            Slug::root()
        } else {
            Slug(slug)
        }
    }

    /// Whether this is the root slug.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Output location for this slug: `<output_root>/<slug>/index.html`,
    /// or `<output_root>/index.html` for the root slug.
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        let mut path = output_root.to_path_buf();
        for segment in self.0.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join("index.html")
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}
