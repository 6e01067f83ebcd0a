//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(force: bool) -> Result<()> {
    tracing::info!("Initializing matilda site...");

    scaffold(Path::new("."), force)?;

    tracing::info!("Run 'matilda build' to build the site.");

    Ok(())
}

/// Write the site skeleton under `root`.
fn scaffold(root: &Path, force: bool) -> Result<()> {
    write_scaffold(&root.join("matilda.toml"), DEFAULT_CONFIG, force)?;
    write_scaffold(&root.join("templates/index.html"), DEFAULT_TEMPLATE, force)?;
    write_scaffold(&root.join("content/index.html"), DEFAULT_HOME, force)?;
    write_scaffold(&root.join("content/about.html"), DEFAULT_ABOUT, force)?;
    write_scaffold(&root.join("static/style.css"), DEFAULT_STYLE, force)?;

    Ok(())
}

fn write_scaffold(path: &Path, contents: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        tracing::warn!(
            "{} already exists, skipping (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Matilda configuration

[site]
# Content source directory
content = "content"

# Static assets, copied into the output verbatim
static = "static"

# Template directory
templates = "templates"

# Output directory
output = "public"

[build]
# Worker threads for page rendering (defaults to one per core)
# workers = 4
"#;

const DEFAULT_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>My Site</title>
    <link rel="stylesheet" href="/style.css">
  </head>
  <body>
    <main>
      {{ main }}
    </main>
  </body>
</html>
"#;

const DEFAULT_HOME: &str = r#"<h1>Welcome</h1>
<p>This site is built with matilda. Edit content/index.html to change this page.</p>
"#;

const DEFAULT_ABOUT: &str = r#"<h1>About</h1>
<p>Files in content/ become routes: this page is served at /about/.</p>
"#;

const DEFAULT_STYLE: &str = r#"body {
  max-width: 42rem;
  margin: 0 auto;
  padding: 2rem 1rem;
  font-family: system-ui, sans-serif;
  line-height: 1.6;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scaffold_creates_site_skeleton() {
        let temp = tempdir().unwrap();

        scaffold(temp.path(), false).unwrap();

        assert!(temp.path().join("matilda.toml").exists());
        assert!(temp.path().join("templates/index.html").exists());
        assert!(temp.path().join("content/index.html").exists());
        assert!(temp.path().join("content/about.html").exists());
        assert!(temp.path().join("static/style.css").exists());

        let template = fs::read_to_string(temp.path().join("templates/index.html")).unwrap();
        assert!(template.contains("{{ main }}"));
    }

    #[test]
    fn default_config_is_valid_toml() {
        let value: toml::Value = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert!(value.get("site").is_some());
        assert!(value.get("build").is_some());
    }

    #[test]
    fn existing_files_are_skipped_without_force() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("matilda.toml");
        fs::write(&config_path, "# mine").unwrap();

        scaffold(temp.path(), false).unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine");
        // The rest of the skeleton is still created.
        assert!(temp.path().join("content/index.html").exists());
    }

    #[test]
    fn force_overwrites_existing_files() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("matilda.toml");
        fs::write(&config_path, "# mine").unwrap();

        scaffold(temp.path(), true).unwrap();

        assert_ne!(fs::read_to_string(&config_path).unwrap(), "# mine");
    }
}
