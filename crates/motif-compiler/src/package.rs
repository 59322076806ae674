//! Package-skeleton materialization.

use crate::error::{CompilerError, Result};
use crate::templates::TemplateEngine;
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File-name suffix marking a skeleton file as a template.
const TEMPLATE_SUFFIX: &str = ".handlebars";

/// Materialize a package skeleton at `destination_root`.
///
/// Walks `template_dir`; files ending in `.handlebars` are rendered with
/// `data` and written with the suffix stripped, everything else is copied
/// verbatim. The destination is created if absent and prior contents are
/// overwritten; compilation is not incremental at the file level. The walk
/// is sorted by file name so two runs materialize in the same order.
pub fn output_template_package<T: Serialize>(
    template_dir: &Path,
    destination_root: &Path,
    data: &T,
) -> Result<()> {
    if !template_dir.is_dir() {
        return Err(CompilerError::MissingTemplate(template_dir.to_path_buf()));
    }

    fs::create_dir_all(destination_root)?;
    let engine = TemplateEngine::new();

    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            CompilerError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walk failed")
            }))
        })?;
        let Ok(relative) = entry.path().strip_prefix(template_dir) else {
            continue;
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(destination_root.join(relative))?;
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if let Some(stripped) = file_name.strip_suffix(TEMPLATE_SUFFIX) {
            let template = fs::read_to_string(entry.path())?;
            let rendered = engine.render_string(&template, data)?;
            let destination = match relative.parent() {
                Some(parent) => destination_root.join(parent).join(stripped),
                None => destination_root.join(stripped),
            };
            fs::write(destination, rendered)?;
        } else {
            fs::copy(entry.path(), destination_root.join(relative))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn skeleton() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json.handlebars"),
            "{\"name\": \"{{moduleName}}\"}",
        )
        .unwrap();
        fs::create_dir(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static").join("logo.svg"), "<svg/>").unwrap();
        dir
    }

    #[test]
    fn test_renders_templates_and_strips_suffix() {
        let template_dir = skeleton();
        let destination = TempDir::new().unwrap();

        output_template_package(
            template_dir.path(),
            &destination.path().join("sdk"),
            &json!({"moduleName": "motif-demo"}),
        )
        .unwrap();

        let manifest =
            fs::read_to_string(destination.path().join("sdk").join("package.json")).unwrap();
        assert_eq!(manifest, "{\"name\": \"motif-demo\"}");
        assert!(!destination.path().join("sdk/package.json.handlebars").exists());
    }

    #[test]
    fn test_copies_non_template_files_verbatim() {
        let template_dir = skeleton();
        let destination = TempDir::new().unwrap();

        output_template_package(template_dir.path(), destination.path(), &json!({})).unwrap();

        let copied = fs::read_to_string(destination.path().join("static").join("logo.svg")).unwrap();
        assert_eq!(copied, "<svg/>");
    }

    #[test]
    fn test_overwrites_stale_destination_contents() {
        let template_dir = skeleton();
        let destination = TempDir::new().unwrap();
        fs::write(destination.path().join("package.json"), "stale").unwrap();

        output_template_package(
            template_dir.path(),
            destination.path(),
            &json!({"moduleName": "fresh"}),
        )
        .unwrap();

        let manifest = fs::read_to_string(destination.path().join("package.json")).unwrap();
        assert_eq!(manifest, "{\"name\": \"fresh\"}");
    }

    #[test]
    fn test_missing_template_dir_is_fatal() {
        let destination = TempDir::new().unwrap();
        let err = output_template_package(
            Path::new("/nonexistent/skeleton"),
            destination.path(),
            &json!({}),
        )
        .unwrap_err();
        assert!(matches!(err, CompilerError::MissingTemplate(_)));
    }
}
