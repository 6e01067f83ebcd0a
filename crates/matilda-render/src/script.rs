//! Executable content renderer.
//!
//! Content files handled by this renderer are programs rather than markup:
//! the renderer runs them and captures stdout as the HTML fragment. This lets
//! a page assemble its own markup at build time, e.g. by reading sibling data
//! files. The spawned program always receives the content file's own path as
//! its first argument.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::traits::{ContentRenderer, RenderError};

/// Renders script content files by executing them.
///
/// By default the file itself is spawned, which on Unix relies on the exec
/// bit and a shebang line. [`ScriptRenderer::with_interpreter`] routes the
/// file through an interpreter instead (e.g. `node` for `.js` content).
/// Either way the script is trusted: its stdout is used verbatim.
#[derive(Debug, Default)]
pub struct ScriptRenderer {
    interpreter: Option<PathBuf>,
}

impl ScriptRenderer {
    /// Renderer that executes content files directly.
    pub fn new() -> Self {
        Self { interpreter: None }
    }

    /// Renderer that runs content files through `program`.
    pub fn with_interpreter(program: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Some(program.into()),
        }
    }
}

impl ContentRenderer for ScriptRenderer {
    fn name(&self) -> &'static str {
        "script"
    }

    fn extensions(&self) -> &[&'static str] {
        &["js"]
    }

    fn render(&self, path: &Path) -> Result<String, RenderError> {
        let program = self.interpreter.as_deref().unwrap_or(path);

        let output = Command::new(program)
            .arg(path)
            .output()
            .map_err(|e| RenderError::Spawn {
                path: path.to_path_buf(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(RenderError::ScriptFailed {
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| RenderError::InvalidOutput {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_script(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn captures_stdout_as_fragment() {
        let temp = tempdir().unwrap();
        let script = temp.path().join("page.js");
        write_script(&script, "#!/bin/sh\nprintf '<p>hi</p>'\n");

        let fragment = ScriptRenderer::new().render(&script).unwrap();

        assert_eq!(fragment, "<p>hi</p>");
    }

    #[test]
    fn passes_own_path_as_first_argument() {
        let temp = tempdir().unwrap();
        let script = temp.path().join("self.js");
        write_script(&script, "#!/bin/sh\nprintf '%s' \"$1\"\n");

        let fragment = ScriptRenderer::new().render(&script).unwrap();

        assert_eq!(fragment, script.display().to_string());
    }

    #[test]
    fn interpreter_mode_runs_through_program() {
        let temp = tempdir().unwrap();
        let script = temp.path().join("page.js");
        // No exec bit: only the interpreter can run it.
        fs::write(&script, "printf '<b>via sh</b>'\n").unwrap();

        let fragment = ScriptRenderer::with_interpreter("/bin/sh")
            .render(&script)
            .unwrap();

        assert_eq!(fragment, "<b>via sh</b>");
    }

    #[test]
    fn nonzero_exit_carries_stderr() {
        let temp = tempdir().unwrap();
        let script = temp.path().join("bad.js");
        write_script(&script, "#!/bin/sh\necho 'broken data' >&2\nexit 3\n");

        let err = ScriptRenderer::new().render(&script).unwrap_err();

        match err {
            RenderError::ScriptFailed { stderr, .. } => assert_eq!(stderr, "broken data"),
            other => panic!("expected ScriptFailed, got {other:?}"),
        }
    }

    #[test]
    fn spawn_failure_on_missing_file() {
        let temp = tempdir().unwrap();

        let err = ScriptRenderer::new()
            .render(&temp.path().join("gone.js"))
            .unwrap_err();

        assert!(matches!(err, RenderError::Spawn { .. }));
    }
}
