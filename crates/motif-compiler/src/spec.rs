//! Resolved component specs handed to target templates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One property resolved for the active target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProperty {
    /// Target-language type name, e.g. `number` or `Color`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Target-language initializer expression, emitted verbatim.
    pub initializer: String,
    /// Whether the property participates in live updates. Primitives are
    /// compiled as constants and are never updatable.
    pub updatable: bool,
}

/// The resolved spec of one component type, from a representative instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetComponentSpec {
    /// Component type name.
    pub component_name: String,
    /// Whether the component is exported as a root. Public components
    /// always render with the full singleton wrapper.
    pub public: bool,
    /// Resolved properties, in declaration order.
    pub properties: IndexMap<String, TargetProperty>,
}

impl TargetComponentSpec {
    /// Create an empty spec for the named component.
    pub fn new(component_name: impl Into<String>, public: bool) -> Self {
        Self {
            component_name: component_name.into(),
            public,
            properties: IndexMap::new(),
        }
    }
}
