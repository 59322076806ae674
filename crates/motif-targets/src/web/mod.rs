//! The web target: compiles a component graph into a JavaScript SDK package
//! with type declarations and CSS/Sass style sheets.

pub mod bindings;
pub mod styles;

pub use bindings::file_binding;
pub use styles::{StyleRuleGroup, StyleTokens, StyleVariable};

use crate::utils::sources_path;
use indexmap::IndexMap;
use motif_compiler::{
    merge_binding, output_template_package, Binding, CompilerError, Output, Result, Target,
    TargetComponentSpec, TargetProperty, TemplateEngine,
};
use motif_core::{PrimitiveKind, Program, Value};
use std::fs;
use std::path::{Path, PathBuf};
use styles::style_tokens;

/// The root location for bundled web sources.
fn core_web() -> PathBuf {
    sources_path().join("web")
}

/// Returns a qualified CSS URL for a given output and relative path.
///
/// Without a hot URL, static assets are assumed to be served by the host
/// application at `/motif`. That cannot be guaranteed in every codebase.
pub fn qualified_css_url(output: &Output, relative_path: &str) -> String {
    format!(
        "url(\"{}/{}\")",
        output.hot_url.as_deref().unwrap_or("/motif"),
        relative_path
    )
}

fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A compiler target for web SDKs.
pub struct WebTarget {
    bindings: IndexMap<String, Binding>,
}

impl WebTarget {
    /// Create a web target with the stock bindings registered.
    pub fn new() -> Self {
        let mut bindings = IndexMap::new();
        bindings.insert("File".to_string(), file_binding());
        Self { bindings }
    }

    /// Register a binding for a component type, replacing any stock one.
    pub fn with_binding(mut self, type_name: impl Into<String>, binding: Binding) -> Self {
        self.bindings.insert(type_name.into(), binding);
        self
    }

    /// Root for hot-served static assets, under the project tree.
    pub fn hot_static_root(&self, program: &Program) -> PathBuf {
        program.project_root.join(".motif").join("hot")
    }

    fn write_style_sdk(&self, lang: &str, tokens: &StyleTokens, static_root: &Path) -> Result<()> {
        let engine = TemplateEngine::new();
        let rendered =
            engine.render_file(&core_web().join(format!("styles.{lang}.handlebars")), tokens)?;
        fs::create_dir_all(static_root)?;
        fs::write(static_root.join(format!("styles.{lang}")), rendered)?;
        Ok(())
    }
}

impl Default for WebTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Target for WebTarget {
    fn validate_options(&self, program: &Program) -> Result<()> {
        if program.options.sdk_version.is_empty() {
            return Err(CompilerError::InvalidOptions(
                "sdk_version must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn hostname(&self) -> Result<String> {
        local_ip_address::local_ip()
            .map(|ip| ip.to_string())
            .map_err(|e| CompilerError::Hostname(e.to_string()))
    }

    fn module_name(&self, output: &Output) -> String {
        format!("motif-{}", output.project_name)
    }

    fn hot_component(&self) -> &'static str {
        "@motif/targets/web.component"
    }

    fn sdk_root(&self, program: &Program) -> PathBuf {
        program
            .project_root
            .join("build")
            .join(format!("motif-{}-web", program.project_name))
    }

    fn seed_output(&self, output: &mut Output) {
        output.sources.insert(core_web().join("core").join("Motif.js"));
        output
            .declarations
            .insert(core_web().join("core").join("Motif.d.ts"));
    }

    fn binding_for(&self, type_name: &str) -> Option<Binding> {
        self.bindings.get(type_name).cloned()
    }

    fn get_primitive(&self, kind: PrimitiveKind, value: &Value) -> Option<TargetProperty> {
        let property = match (kind, value) {
            (PrimitiveKind::String, Value::Str(s)) => TargetProperty {
                type_name: "string".into(),
                initializer: format!("\"{}\"", escape_js_string(s)),
                updatable: false,
            },
            (PrimitiveKind::Int, Value::Int(n)) => TargetProperty {
                type_name: "number".into(),
                initializer: n.to_string(),
                updatable: false,
            },
            (PrimitiveKind::Float, Value::Float(n)) => TargetProperty {
                type_name: "number".into(),
                initializer: n.to_string(),
                updatable: false,
            },
            (PrimitiveKind::Float, Value::Int(n)) => TargetProperty {
                type_name: "number".into(),
                initializer: n.to_string(),
                updatable: false,
            },
            (PrimitiveKind::Boolean, Value::Bool(b)) => TargetProperty {
                type_name: "boolean".into(),
                initializer: b.to_string(),
                updatable: false,
            },
            _ => {
                log::warn!("Unknown non-component primitive value with kind {kind:?}");
                return None;
            }
        };
        Some(property)
    }

    fn get_initializer(&self, spec: &TargetComponentSpec) -> String {
        let property_initializers: Vec<String> = spec
            .properties
            .iter()
            .map(|(name, property)| format!("{name}: {}", property.initializer))
            .collect();
        format!(
            "new {}({{{}}})",
            spec.component_name,
            property_initializers.join(", ")
        )
    }

    fn collect_component_properties(
        &self,
        properties: &[Option<TargetProperty>],
    ) -> Option<TargetProperty> {
        let present: Vec<&TargetProperty> = properties.iter().filter_map(|p| p.as_ref()).collect();
        let reference = present.first()?;

        Some(TargetProperty {
            type_name: format!("{}[]", reference.type_name),
            initializer: format!(
                "[{}]",
                present
                    .iter()
                    .map(|property| property.initializer.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            updatable: false,
        })
    }

    fn usage_instructions(&self, program: &Program, output: &Output) -> String {
        let module_name = self.module_name(output);
        let component = program
            .local_component_names
            .keys()
            .next()
            .cloned()
            .unwrap_or_default();
        let style_variable = output
            .styles
            .variables
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "my-variable".into());

        format!(
            "Motif package compiled to {root}.\n\n\
             You can depend on {module_name} in package.json:\n\n  \
             \"dependencies\": {{\n    \"{module_name}\": \"*\"\n  }}\n\n\
             You can use the variables and classes defined by Motif in your CSS or Sass styles.\n  \
             CSS:  rule: var(--{style_variable});\n  \
             Sass: rule: ${style_variable};\n\n\
             You can also use Motif with JavaScript to bootstrap any of the components defined in \
             your project:\n\n  \
             new Motif({component}).attach((component) => {{\n    // ...\n  }});\n",
            root = output.sdk_root.display(),
        )
    }

    fn static_root(&self, _program: &Program, output: &Output) -> PathBuf {
        output.sdk_root.join("static")
    }

    fn write_assets(&self, program: &Program, output: &mut Output) -> Result<()> {
        let static_root = if program.hot {
            self.hot_static_root(program)
        } else {
            self.static_root(program, output)
        };

        for (relative, content) in &output.asset_bindings {
            let destination = static_root.join(relative);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            match content {
                motif_compiler::AssetContent::Contents(bytes) => fs::write(&destination, bytes)?,
                motif_compiler::AssetContent::CopyFrom(source) => {
                    fs::copy(source, &destination)?;
                }
            }
        }

        let tokens = style_tokens(output);
        self.write_style_sdk("css", &tokens, &static_root)?;
        self.write_style_sdk("scss", &tokens, &static_root)?;
        Ok(())
    }

    fn write_sdk(&self, program: &Program, output: &mut Output) -> Result<()> {
        // Pass through to take note of our singletons before any rendering.
        let singletons = output.singletons();

        let engine = TemplateEngine::new();
        let component_template = core_web().join("js.component.handlebars");
        let declaration_template = core_web().join("js.declaration.handlebars");

        // Rendered per-component files stage in a temp dir; their names are
        // internal and never surface in the package.
        let staging = tempfile::tempdir()?;

        let names: Vec<String> = output.processed_components.keys().cloned().collect();
        for name in &names {
            let (spec, binding) = {
                let Some(component) = output.processed_components.get_mut(name) else {
                    continue;
                };
                // For each singleton, replace the shared reference with its
                // simple constructor.
                for property in component.spec.properties.values_mut() {
                    if singletons.contains(&property.type_name) {
                        property.initializer = format!("new {}()", property.type_name);
                    }
                }
                (component.spec.clone(), component.binding.clone())
            };

            let mut data = serde_json::to_value(&spec)?;
            if let serde_json::Value::Object(map) = &mut data {
                map.insert(
                    "singleton".into(),
                    serde_json::Value::Bool(spec.public || singletons.contains(name)),
                );
            }

            let source_path = staging.path().join(format!("{name}.js"));
            fs::write(&source_path, engine.render_file(&component_template, &data)?)?;
            output.sources.insert(source_path);

            if let Some(binding) = &binding {
                merge_binding(binding, output);
            }

            // Binding-supplied declarations fully replace the generated one.
            if binding.as_ref().is_some_and(|b| !b.declarations.is_empty()) {
                continue;
            }

            let declaration_path = staging.path().join(format!("{name}.d.ts"));
            fs::write(
                &declaration_path,
                engine.render_file(&declaration_template, &spec)?,
            )?;
            output.declarations.insert(declaration_path);
        }

        let mut sources = Vec::new();
        for path in &output.sources {
            sources.push(fs::read_to_string(path)?);
        }
        let mut declarations = Vec::new();
        for path in &output.declarations {
            declarations.push(fs::read_to_string(path)?);
        }

        let tokens = serde_json::json!({
            "moduleName": self.module_name(output),
            "sdkVersion": program.options.sdk_version,
            "dependencies": output.dependencies.values().collect::<Vec<_>>(),
            "sources": sources,
            "declarations": declarations,
            "declarationImports": output.declaration_imports,
        });

        self.write_assets(program, output)?;
        output_template_package(&core_web().join("sdk"), &output.sdk_root, &tokens)
    }
}
