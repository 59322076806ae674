//! Template engine for package rendering.

use crate::error::{CompilerError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

/// Template engine using Handlebars.
///
/// Escaping is disabled: templates emit source code, not HTML. Missing
/// optional keys render as empty output.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CompilerError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CompilerError::Template)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CompilerError::Template)
    }

    /// Render a template file. A missing file is fatal for the run.
    pub fn render_file<T: Serialize>(&self, path: &Path, data: &T) -> Result<String> {
        let template = std::fs::read_to_string(path)
            .map_err(|_| CompilerError::MissingTemplate(path.to_path_buf()))?;
        self.render_string(&template, data)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Pascal case helper
        handlebars.register_helper(
            "pascal_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&to_pascal_case(param))?;
                    Ok(())
                },
            ),
        );

        // Camel case helper
        handlebars.register_helper(
            "camel_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&to_camel_case(param))?;
                    Ok(())
                },
            ),
        );

        // Kebab case helper
        handlebars.register_helper(
            "kebab_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&to_kebab_case(param))?;
                    Ok(())
                },
            ),
        );

        // Join helper
        handlebars.register_helper(
            "join",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let arr = h.param(0).and_then(|v| v.value().as_array());
                    let sep = h
                        .param(1)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or(", ");

                    if let Some(items) = arr {
                        let joined = items
                            .iter()
                            .filter_map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(sep);
                        out.write(&joined)?;
                    }
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert to PascalCase.
fn to_pascal_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    s.to_case(Case::Pascal)
}

/// Convert to camelCase.
fn to_camel_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    s.to_case(Case::Camel)
}

/// Convert to kebab-case.
fn to_kebab_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    s.to_case(Case::Kebab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let mut engine = TemplateEngine::new();
        engine
            .register_template("hello", "Hello, {{name}}!")
            .unwrap();

        let result = engine.render("hello", &json!({"name": "World"})).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_missing_keys_render_empty() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("a{{missing}}b", &json!({"name": "x"}))
            .unwrap();
        assert_eq!(result, "ab");
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{code}}", &json!({"code": "new A(\"<>&\")"}))
            .unwrap();
        assert_eq!(result, "new A(\"<>&\")");
    }

    #[test]
    fn test_kebab_case_helper() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{kebab_case name}}", &json!({"name": "MyComponent"}))
            .unwrap();
        assert_eq!(result, "my-component");
    }

    #[test]
    fn test_missing_template_file_is_fatal() {
        let engine = TemplateEngine::new();
        let err = engine
            .render_file(Path::new("/nonexistent/component.handlebars"), &json!({}))
            .unwrap_err();
        assert!(matches!(err, CompilerError::MissingTemplate(_)));
    }
}
