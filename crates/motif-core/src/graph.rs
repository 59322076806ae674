//! Component types, instances, and the program record.

use crate::errors::GraphError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Primitive kinds a property declaration can carry.
///
/// `Unknown` is an open escape hatch: upstream graphs may carry kinds no
/// target can represent, and targets degrade by omitting those properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Int,
    Float,
    Boolean,
    Unknown,
}

/// Declared type of a component property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// A primitive scalar.
    Primitive(PrimitiveKind),
    /// A reference to another component type, by name.
    Component(String),
    /// A homogeneous collection of the element type.
    List(Box<PropertyType>),
}

/// A component type: a name plus its ordered property declarations.
///
/// Immutable once the graph is built; declaration order is the order
/// resolved properties are emitted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentType {
    /// Type name, e.g. `Color`.
    pub name: String,
    /// Ordered property declarations.
    pub properties: IndexMap<String, PropertyType>,
}

impl ComponentType {
    /// Create a type with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    /// Append a property declaration, preserving declaration order.
    pub fn with_property(mut self, name: impl Into<String>, property_type: PropertyType) -> Self {
        self.properties.insert(name.into(), property_type);
        self
    }
}

/// Index of an instance in the program's instance arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub usize);

/// A resolved property value on an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A nested component instance.
    Child(InstanceId),
    List(Vec<Value>),
    /// Payload for `PrimitiveKind::Unknown` properties.
    Raw(serde_json::Value),
}

/// A concrete value of a [`ComponentType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// Name of the instantiated component type.
    pub type_name: String,
    /// Property values, keyed by declared property name.
    pub properties: IndexMap<String, Value>,
}

/// Options set by the SDK driver for one compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Version stamped into the generated package manifest.
    pub sdk_version: String,
    /// Port the hot server binds, when `hot` is set.
    pub hot_port: Option<u16>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            sdk_version: "0.1.0".into(),
            hot_port: None,
        }
    }
}

/// The immutable program submitted for compilation.
///
/// Produced by [`ProgramBuilder`] (or deserialized from an upstream
/// extractor); treated as already validated by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Logical project name, e.g. `my-design-system`.
    pub project_name: String,
    /// Root of the project on disk; SDK output and hot assets live under it.
    pub project_root: PathBuf,
    /// Driver-supplied options.
    pub options: CompilerOptions,
    /// Whether this run serves a hot-reload session.
    pub hot: bool,
    /// All registered component types, in registration order.
    pub component_types: IndexMap<String, ComponentType>,
    /// Instance arena; [`InstanceId`] indexes into it.
    pub instances: Vec<ComponentInstance>,
    /// Exported roots: component name visible to SDK consumers → instance.
    pub local_component_names: IndexMap<String, InstanceId>,
}

impl Program {
    /// Look up a component type by name.
    pub fn component_type(&self, name: &str) -> Option<&ComponentType> {
        self.component_types.get(name)
    }

    /// Look up an instance by id.
    pub fn instance(&self, id: InstanceId) -> &ComponentInstance {
        &self.instances[id.0]
    }

    /// Whether a component type is exported as a root.
    ///
    /// Public components always render with the full singleton wrapper,
    /// regardless of instance count.
    pub fn is_public(&self, type_name: &str) -> bool {
        self.local_component_names
            .values()
            .any(|id| self.instance(*id).type_name == type_name)
    }
}

/// Builds a [`Program`], deduplicating instances by structural identity.
///
/// Two structurally identical instances of one type share an
/// [`InstanceId`]; the compiler never re-deduplicates.
#[derive(Debug)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    /// Start a builder for the named project.
    pub fn new(project_name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            program: Program {
                project_name: project_name.into(),
                project_root: project_root.into(),
                options: CompilerOptions::default(),
                hot: false,
                component_types: IndexMap::new(),
                instances: Vec::new(),
                local_component_names: IndexMap::new(),
            },
        }
    }

    /// Override the driver options.
    pub fn options(mut self, options: CompilerOptions) -> Self {
        self.program.options = options;
        self
    }

    /// Mark this program as a hot-reload run.
    pub fn hot(mut self, hot: bool) -> Self {
        self.program.hot = hot;
        self
    }

    /// Register a component type. Registering the same name twice is an error.
    pub fn register_type(&mut self, component_type: ComponentType) -> Result<(), GraphError> {
        if self.program.component_types.contains_key(&component_type.name) {
            return Err(GraphError::DuplicateComponentType {
                name: component_type.name,
            });
        }
        self.program
            .component_types
            .insert(component_type.name.clone(), component_type);
        Ok(())
    }

    /// Add an instance of a registered type.
    ///
    /// Property names are checked against the type's declarations.
    /// A structurally identical instance returns the existing id.
    pub fn add_instance<'a>(
        &mut self,
        type_name: &str,
        properties: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<InstanceId, GraphError> {
        let component_type = self.program.component_types.get(type_name).ok_or_else(|| {
            GraphError::UnknownComponentType {
                name: type_name.to_string(),
            }
        })?;

        let mut values = IndexMap::new();
        for (name, value) in properties {
            if !component_type.properties.contains_key(name) {
                return Err(GraphError::UnknownProperty {
                    component: type_name.to_string(),
                    property: name.to_string(),
                });
            }
            values.insert(name.to_string(), value);
        }

        let instance = ComponentInstance {
            type_name: type_name.to_string(),
            properties: values,
        };

        // Structural dedup: an identical instance already in the arena wins.
        if let Some(index) = self.program.instances.iter().position(|i| *i == instance) {
            return Ok(InstanceId(index));
        }

        self.program.instances.push(instance);
        Ok(InstanceId(self.program.instances.len() - 1))
    }

    /// Export an instance as a named root component.
    pub fn export(&mut self, name: impl Into<String>, id: InstanceId) {
        self.program.local_component_names.insert(name.into(), id);
    }

    /// Finish building. The result is immutable from the compiler's view.
    pub fn build(self) -> Program {
        self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_type() -> ComponentType {
        ComponentType::new("Color")
            .with_property("hex", PropertyType::Primitive(PrimitiveKind::String))
            .with_property("alpha", PropertyType::Primitive(PrimitiveKind::Float))
    }

    #[test]
    fn test_duplicate_type_registration_fails() {
        let mut builder = ProgramBuilder::new("p", "/tmp/p");
        builder.register_type(color_type()).unwrap();
        let err = builder.register_type(color_type()).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateComponentType { .. }));
    }

    #[test]
    fn test_structural_dedup_returns_same_id() {
        let mut builder = ProgramBuilder::new("p", "/tmp/p");
        builder.register_type(color_type()).unwrap();

        let first = builder
            .add_instance("Color", [("hex", Value::Str("#f00".into()))])
            .unwrap();
        let second = builder
            .add_instance("Color", [("hex", Value::Str("#f00".into()))])
            .unwrap();
        let third = builder
            .add_instance("Color", [("hex", Value::Str("#00f".into()))])
            .unwrap();

        assert_eq!(first, second);
        assert_ne!(first, third);

        let program = builder.build();
        assert_eq!(program.instances.len(), 2);
    }

    #[test]
    fn test_unknown_property_rejected() {
        let mut builder = ProgramBuilder::new("p", "/tmp/p");
        builder.register_type(color_type()).unwrap();
        let err = builder
            .add_instance("Color", [("nope", Value::Bool(true))])
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownProperty { .. }));
    }

    #[test]
    fn test_public_detection() {
        let mut builder = ProgramBuilder::new("p", "/tmp/p");
        builder.register_type(color_type()).unwrap();
        let red = builder
            .add_instance("Color", [("hex", Value::Str("#f00".into()))])
            .unwrap();
        builder.export("red", red);
        let program = builder.build();

        assert!(program.is_public("Color"));
        assert!(!program.is_public("Typograph"));
    }

    #[test]
    fn test_program_serde_round_trip() {
        let mut builder = ProgramBuilder::new("p", "/tmp/p");
        builder.register_type(color_type()).unwrap();
        let red = builder
            .add_instance("Color", [("hex", Value::Str("#f00".into()))])
            .unwrap();
        builder.export("red", red);
        let program = builder.build();

        let json = serde_json::to_string(&program).unwrap();
        let loaded: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(program, loaded);
    }
}
