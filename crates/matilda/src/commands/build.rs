//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use matilda_site::{BuildConfig, BuildReport, SiteBuilder};
use serde::Deserialize;

const BANNER: &str = r"
███╗   ███╗ █████╗ ████████╗██╗██╗     ██████╗  █████╗ 
████╗ ████║██╔══██╗╚══██╔══╝██║██║     ██╔══██╗██╔══██╗
██╔████╔██║███████║   ██║   ██║██║     ██║  ██║███████║
██║╚██╔╝██║██╔══██║   ██║   ██║██║     ██║  ██║██╔══██║
██║ ╚═╝ ██║██║  ██║   ██║   ██║███████╗██████╔╝██║  ██║
╚═╝     ╚═╝╚═╝  ╚═╝   ╚═╝   ╚═╝╚══════╝╚═════╝ ╚═╝  ╚═╝
";

const FINISHED: &str = "\n Finished. ";

/// Configuration file structure (matilda.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteSection,
    #[serde(default)]
    build: BuildSection,
}

#[derive(Debug, Deserialize)]
struct SiteSection {
    #[serde(default = "default_content")]
    content: String,
    #[serde(rename = "static", default = "default_static")]
    static_dir: String,
    #[serde(default = "default_templates")]
    templates: String,
    #[serde(default = "default_output")]
    output: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            content: default_content(),
            static_dir: default_static(),
            templates: default_templates(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct BuildSection {
    workers: Option<usize>,
}

fn default_content() -> String {
    "content".to_string()
}
fn default_static() -> String {
    "static".to_string()
}
fn default_templates() -> String {
    "templates".to_string()
}
fn default_output() -> String {
    "public".to_string()
}

/// Load configuration from matilda.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the build command.
///
/// Prints the banner up front and the closing `Finished.` line no matter
/// what: a failed build is reported on stderr but the command still exits
/// zero.
pub async fn run(config_path: &Path, output: Option<PathBuf>, jobs: Option<usize>) -> Result<()> {
    println!("{BANNER}");

    match build_site(config_path, output, jobs).await {
        Ok(report) => {
            tracing::info!(
                "Built {} pages and copied {} assets in {}ms",
                report.written(),
                report.assets,
                report.duration_ms
            );
            if !report.is_complete() {
                tracing::warn!("{} pages failed to build", report.failed());
            }
            tracing::info!("Output: {}", report.output_dir.display());
        }
        Err(e) => {
            eprintln!("{BANNER}");
            tracing::error!("Build failed: {:#}", e);
        }
    }

    println!("{FINISHED}");

    Ok(())
}

async fn build_site(
    config_path: &Path,
    output: Option<PathBuf>,
    jobs: Option<usize>,
) -> Result<BuildReport> {
    let file_config = load_config(config_path)?;

    let config = BuildConfig {
        content_dir: PathBuf::from(&file_config.site.content),
        static_dir: PathBuf::from(&file_config.site.static_dir),
        templates_dir: PathBuf::from(&file_config.site.templates),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        workers: jobs.or(file_config.build.workers),
    };

    Ok(SiteBuilder::new(config).build().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Site skeleton plus a matilda.toml of absolute paths; returns the
    /// config path.
    fn site_config(root: &Path) -> PathBuf {
        write_file(&root.join("templates/index.html"), "[{{main}}]");
        write_file(&root.join("content/index.html"), "Home");
        fs::create_dir_all(root.join("static")).unwrap();

        let config = format!(
            r#"
[site]
content = "{content}"
static = "{static_dir}"
templates = "{templates}"
output = "{output}"

[build]
workers = 2
"#,
            content = root.join("content").display(),
            static_dir = root.join("static").display(),
            templates = root.join("templates").display(),
            output = root.join("public").display(),
        );

        let config_path = root.join("matilda.toml");
        fs::write(&config_path, config).unwrap();
        config_path
    }

    #[tokio::test]
    async fn builds_site_from_config_file() {
        let temp = tempdir().unwrap();
        let config_path = site_config(temp.path());

        let report = build_site(&config_path, None, None).await.unwrap();

        assert_eq!(report.written(), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("public/index.html")).unwrap(),
            "[Home]"
        );
    }

    #[tokio::test]
    async fn output_flag_overrides_config() {
        let temp = tempdir().unwrap();
        let config_path = site_config(temp.path());
        let override_dir = temp.path().join("dist");

        let report = build_site(&config_path, Some(override_dir.clone()), None)
            .await
            .unwrap();

        assert_eq!(report.output_dir, override_dir);
        assert!(override_dir.join("index.html").exists());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = load_config(Path::new("/no/such/matilda.toml")).unwrap();

        assert_eq!(config.site.content, "content");
        assert_eq!(config.site.static_dir, "static");
        assert_eq!(config.site.templates, "templates");
        assert_eq!(config.site.output, "public");
        assert_eq!(config.build.workers, None);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("matilda.toml");
        fs::write(&config_path, "site = ").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[tokio::test]
    async fn failed_build_still_exits_cleanly() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("matilda.toml");
        let config = format!(
            r#"
[site]
content = "{root}/content"
static = "{root}/static"
templates = "{root}/templates"
output = "{root}/public"
"#,
            root = temp.path().display()
        );
        fs::write(&config_path, config).unwrap();

        // None of the site directories exist, so the build fails, but the
        // command still reports success.
        let result = run(&config_path, None, None).await;

        assert!(result.is_ok());
    }
}
