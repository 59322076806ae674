//! Stock bindings shipped with the web target.

use crate::utils::sources_path;
use indexmap::IndexMap;
use motif_compiler::{AssetContent, Binding, Result};
use motif_core::{ComponentInstance, Program, Value};

/// Binding for the `File` component type.
///
/// Ships a small runtime wrapper and binds each referenced file into the
/// static asset map, keyed by its project-relative path.
pub fn file_binding() -> Binding {
    Binding::new()
        .with_source(sources_path().join("web").join("bindings").join("File.js"))
        .with_declaration(sources_path().join("web").join("bindings").join("File.d.ts"))
        .with_asset_binder(file_asset_binder)
}

fn file_asset_binder(
    instance: &ComponentInstance,
    program: &Program,
    assets: &mut IndexMap<String, AssetContent>,
) -> Result<()> {
    let Some(Value::Str(src)) = instance.properties.get("src") else {
        return Ok(());
    };
    assets.insert(
        src.clone(),
        AssetContent::CopyFrom(program.project_root.join(src)),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::{ComponentType, PrimitiveKind, ProgramBuilder, PropertyType};

    #[test]
    fn test_file_binding_declares_runtime_sources() {
        let binding = file_binding();
        assert_eq!(binding.sources.len(), 1);
        assert_eq!(binding.declarations.len(), 1);
        assert!(binding.asset_binder.is_some());
        assert!(binding.sources[0].ends_with("web/bindings/File.js"));
    }

    #[test]
    fn test_asset_binder_keys_by_project_relative_path() {
        let mut builder = ProgramBuilder::new("demo", "/projects/demo");
        builder
            .register_type(
                ComponentType::new("File")
                    .with_property("src", PropertyType::Primitive(PrimitiveKind::String)),
            )
            .unwrap();
        let id = builder
            .add_instance("File", [("src", Value::Str("assets/logo.svg".into()))])
            .unwrap();
        builder.export("logo", id);
        let program = builder.build();

        let mut assets = IndexMap::new();
        file_asset_binder(program.instance(id), &program, &mut assets).unwrap();

        assert_eq!(
            assets["assets/logo.svg"],
            AssetContent::CopyFrom("/projects/demo/assets/logo.svg".into())
        );
    }
}
