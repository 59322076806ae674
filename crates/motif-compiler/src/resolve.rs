//! The resolver walk: component instances to target specs.

use crate::error::{CompilerError, Result};
use crate::output::{Output, ProcessedComponent};
use crate::spec::{TargetComponentSpec, TargetProperty};
use crate::target::Target;
use indexmap::{IndexMap, IndexSet};
use motif_core::{InstanceId, Program, PropertyType, Value};

/// Resolve a root instance and register every component type reached from
/// it. Registration order is completion order of the recursive walk, so
/// nested types register before the components containing them; that
/// insertion order is the render iteration order.
pub fn resolve_root<T: Target + ?Sized>(
    target: &T,
    program: &Program,
    id: InstanceId,
    output: &mut Output,
) -> Result<()> {
    resolve_instance(target, program, id, output)?;
    Ok(())
}

fn resolve_instance<T: Target + ?Sized>(
    target: &T,
    program: &Program,
    id: InstanceId,
    output: &mut Output,
) -> Result<TargetComponentSpec> {
    let instance = program.instance(id);
    let component_type = program
        .component_type(&instance.type_name)
        .ok_or_else(|| CompilerError::UnknownComponent(instance.type_name.clone()))?;

    let mut properties = IndexMap::new();
    for (name, declared) in &component_type.properties {
        let Some(value) = instance.properties.get(name) else {
            continue;
        };
        // Unrepresentable properties resolve to None and are omitted;
        // sibling properties are unaffected.
        if let Some(property) = resolve_property(target, program, declared, value, output)? {
            properties.insert(name.clone(), property);
        }
    }

    let spec = TargetComponentSpec {
        component_name: component_type.name.clone(),
        public: program.is_public(&component_type.name),
        properties,
    };

    register(target, program, id, &spec, output)?;
    Ok(spec)
}

fn resolve_property<T: Target + ?Sized>(
    target: &T,
    program: &Program,
    declared: &PropertyType,
    value: &Value,
    output: &mut Output,
) -> Result<Option<TargetProperty>> {
    match declared {
        PropertyType::Primitive(kind) => Ok(target.get_primitive(*kind, value)),
        PropertyType::List(element) => {
            let Value::List(items) = value else {
                log::warn!("Expected a list value for a collection property; omitting");
                return Ok(None);
            };
            let mut resolved = Vec::with_capacity(items.len());
            for item in items {
                resolved.push(resolve_property(target, program, element, item, output)?);
            }
            Ok(target.collect_component_properties(&resolved))
        }
        PropertyType::Component(_) => {
            let Value::Child(child_id) = value else {
                log::warn!("Expected a nested instance for a component property; omitting");
                return Ok(None);
            };
            let child_spec = resolve_instance(target, program, *child_id, output)?;
            Ok(Some(TargetProperty {
                type_name: child_spec.component_name.clone(),
                initializer: target.get_initializer(&child_spec),
                updatable: true,
            }))
        }
    }
}

/// Register one processed instance: the first full resolution of a type
/// supplies the representative spec and triggers the binding lookup; every
/// distinct instance id joins the type's instance set; the binding's asset
/// binder runs exactly once per distinct instance.
fn register<T: Target + ?Sized>(
    target: &T,
    program: &Program,
    id: InstanceId,
    spec: &TargetComponentSpec,
    output: &mut Output,
) -> Result<()> {
    let component = output
        .processed_components
        .entry(spec.component_name.clone())
        .or_insert_with(|| ProcessedComponent {
            spec: spec.clone(),
            instances: IndexSet::new(),
            binding: target.binding_for(&spec.component_name),
        });

    let binder = component.binding.as_ref().and_then(|b| b.asset_binder);
    let newly_seen = component.instances.insert(id);

    if newly_seen {
        if let Some(binder) = binder {
            binder(program.instance(id), program, &mut output.asset_bindings)?;
        }
    }

    Ok(())
}
