//! Sketch document exporter.
//!
//! Shells out to `sketchtool`, discovered through Spotlight, to export
//! slices and artboards as SVG. Only available on macOS hosts.

use crate::error::ExportError;
use crate::exporters::{Exporter, ProgressReporter};
use crate::runner::{CommandRunner, ShellRunner};
use std::path::{Path, PathBuf};

const SKETCH_EXTENSION: &str = "sketch";
const SKETCHTOOL_RELATIVE_PATH: &str = "Contents/Resources/sketchtool/bin/sketchtool";
const SKETCH_BUNDLE_QUERY: &str = "kMDItemCFBundleIdentifier=com.bohemiancoding.sketch3";

/// Asset groups exported from a Sketch document, in invocation order.
const EXPORT_GROUPS: [&str; 2] = ["slices", "artboards"];

/// Exporter for `.sketch` documents.
pub struct SketchExporter {
    runner: Box<dyn CommandRunner>,
    platform: &'static str,
}

impl SketchExporter {
    /// Create an exporter for the current host.
    pub fn new() -> Self {
        Self {
            runner: Box::new(ShellRunner),
            platform: std::env::consts::OS,
        }
    }

    /// Create an exporter with an injected runner and platform, for tests.
    pub fn with_runner(runner: Box<dyn CommandRunner>, platform: &'static str) -> Self {
        Self { runner, platform }
    }

    /// Normalize the path string, tolerating trailing whitespace.
    fn normalized(source: &Path) -> PathBuf {
        PathBuf::from(source.to_string_lossy().trim_end())
    }
}

impl Default for SketchExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for SketchExporter {
    fn can_parse(&self, source: &Path) -> bool {
        let source = Self::normalized(source);
        // Case-sensitive extension match, then existence.
        source.extension() == Some(std::ffi::OsStr::new(SKETCH_EXTENSION)) && source.is_file()
    }

    fn export(
        &self,
        source: &Path,
        out_dir: &Path,
        progress: ProgressReporter,
    ) -> Result<(), ExportError> {
        if !self.can_parse(source) {
            return Err(ExportError::InvalidSourceFile);
        }

        if self.platform != "macos" {
            return Err(ExportError::UnsupportedHost {
                platform: self.platform.to_string(),
            });
        }

        progress("Locating the Sketch installation");
        let discovered = self.runner.run("mdfind", &[SKETCH_BUNDLE_QUERY])?;
        let app_path = discovered.lines().next().unwrap_or("").trim();
        if app_path.is_empty() {
            return Err(ExportError::ToolNotInstalled);
        }

        let sketchtool = Path::new(app_path)
            .join(SKETCHTOOL_RELATIVE_PATH)
            .display()
            .to_string();
        let source = Self::normalized(source).display().to_string();

        for group in EXPORT_GROUPS {
            progress(&format!("Exporting Sketch {group}"));
            let output_arg = format!("--output={}", out_dir.join(group).display());
            self.runner.run(
                &sketchtool,
                &["export", "--format=svg", &output_arg, group, &source],
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Records every invocation; answers `mdfind` with the app path.
    #[derive(Default)]
    struct FakeRunner {
        commands: RefCell<Vec<String>>,
        mdfind_result: Option<&'static str>,
        fail_with: Option<&'static str>,
    }

    impl FakeRunner {
        fn sketch_installed() -> Self {
            Self {
                mdfind_result: Some("/Applications/Sketch.app\n"),
                ..Default::default()
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, command: &str, args: &[&str]) -> Result<String, ExportError> {
            self.commands
                .borrow_mut()
                .push(format!("{command} {}", args.join(" ")));
            if let Some(message) = self.fail_with {
                return Err(ExportError::Tool(message.to_string()));
            }
            if command == "mdfind" {
                return Ok(self.mdfind_result.unwrap_or("").to_string());
            }
            Ok(String::new())
        }
    }

    /// Lets a test keep a handle on the runner the exporter owns.
    struct SharedRunner(Rc<FakeRunner>);

    impl CommandRunner for SharedRunner {
        fn run(&self, command: &str, args: &[&str]) -> Result<String, ExportError> {
            self.0.run(command, args)
        }
    }

    fn sketch_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("shape.sketch");
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_can_parse_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let exporter = SketchExporter::new();

        for name in ["shape.ai", "shape.sketchster"] {
            let path = dir.path().join(name);
            fs::write(&path, "").unwrap();
            assert!(!exporter.can_parse(&path));
        }
    }

    #[test]
    fn test_can_parse_requires_existence() {
        let dir = TempDir::new().unwrap();
        let exporter = SketchExporter::new();
        assert!(!exporter.can_parse(&dir.path().join("missing.sketch")));
    }

    #[test]
    fn test_can_parse_accepts_sketch_files() {
        let dir = TempDir::new().unwrap();
        let exporter = SketchExporter::new();
        assert!(exporter.can_parse(&sketch_file(&dir)));
    }

    #[test]
    fn test_can_parse_tolerates_trailing_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = sketch_file(&dir);
        let padded = PathBuf::from(format!("{}  ", path.display()));

        let exporter = SketchExporter::new();
        assert!(exporter.can_parse(&padded));
    }

    #[test]
    fn test_export_command_sequence() {
        let dir = TempDir::new().unwrap();
        let source = sketch_file(&dir);
        let runner = Rc::new(FakeRunner::sketch_installed());

        let exporter =
            SketchExporter::with_runner(Box::new(SharedRunner(runner.clone())), "macos");
        let mut messages = Vec::new();
        exporter
            .export(&source, Path::new("outdir"), &mut |m| {
                messages.push(m.to_string())
            })
            .unwrap();
        assert_eq!(messages.len(), 3);

        let sketchtool = "/Applications/Sketch.app/Contents/Resources/sketchtool/bin/sketchtool";
        let commands = runner.commands.borrow();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            format!("mdfind {SKETCH_BUNDLE_QUERY}")
        );
        assert_eq!(
            commands[1],
            format!(
                "{sketchtool} export --format=svg --output=outdir/slices slices {}",
                source.display()
            )
        );
        assert_eq!(
            commands[2],
            format!(
                "{sketchtool} export --format=svg --output=outdir/artboards artboards {}",
                source.display()
            )
        );
    }

    #[test]
    fn test_export_rejects_unparseable_sources_before_any_command() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shape.ai");
        fs::write(&path, "").unwrap();

        let runner = Rc::new(FakeRunner::sketch_installed());
        let exporter =
            SketchExporter::with_runner(Box::new(SharedRunner(runner.clone())), "macos");
        let err = exporter
            .export(&path, Path::new("outdir"), &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, ExportError::InvalidSourceFile));
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_export_of_missing_file_fails_before_any_command() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.sketch");

        let runner = Rc::new(FakeRunner::sketch_installed());
        let exporter =
            SketchExporter::with_runner(Box::new(SharedRunner(runner.clone())), "macos");
        let err = exporter
            .export(&missing, Path::new("outdir"), &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, ExportError::InvalidSourceFile));
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_export_fails_on_unsupported_host_before_tool_discovery() {
        let dir = TempDir::new().unwrap();
        let source = sketch_file(&dir);

        let runner = Rc::new(FakeRunner::sketch_installed());
        let exporter =
            SketchExporter::with_runner(Box::new(SharedRunner(runner.clone())), "windows");
        let err = exporter
            .export(&source, Path::new("outdir"), &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, ExportError::UnsupportedHost { .. }));
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_missing_installation_reported() {
        let dir = TempDir::new().unwrap();
        let source = sketch_file(&dir);
        let exporter = SketchExporter::with_runner(
            Box::new(FakeRunner {
                mdfind_result: Some(""),
                ..Default::default()
            }),
            "macos",
        );

        let err = exporter
            .export(&source, Path::new("outdir"), &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, ExportError::ToolNotInstalled));
    }

    #[test]
    fn test_tool_errors_preserve_the_tool_message() {
        let dir = TempDir::new().unwrap();
        let source = sketch_file(&dir);
        let exporter = SketchExporter::with_runner(
            Box::new(FakeRunner {
                fail_with: Some("Whoops!"),
                ..Default::default()
            }),
            "macos",
        );

        let err = exporter
            .export(&source, Path::new("outdir"), &mut |_| {})
            .unwrap_err();
        assert!(err.to_string().contains("Whoops!"));
    }
}
