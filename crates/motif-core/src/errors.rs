//! Error types for graph construction.

use thiserror::Error;

/// Errors raised while building a component graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A component type was registered twice.
    #[error("Component type already registered: {name}")]
    DuplicateComponentType { name: String },

    /// An instance referenced a type that was never registered.
    #[error("Unknown component type: {name}")]
    UnknownComponentType { name: String },

    /// An instance supplied a property its type does not declare.
    #[error("Component '{component}' does not declare property '{property}'")]
    UnknownProperty { component: String, property: String },

    /// An exported root referenced an instance id outside the arena.
    #[error("Unknown instance id: {id}")]
    UnknownInstance { id: usize },
}
