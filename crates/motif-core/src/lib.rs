//! The immutable component graph consumed by the Motif compiler.
//!
//! A design system is described as a graph of component types and
//! instantiated values. An upstream extractor builds the graph once, with
//! structural deduplication of instances; the compiler walks it read-only.
//!
//! # Example
//!
//! ```
//! use motif_core::{ComponentType, PrimitiveKind, ProgramBuilder, PropertyType, Value};
//!
//! let mut builder = ProgramBuilder::new("palette", "/tmp/palette");
//! builder.register_type(ComponentType::new("Color").with_property(
//!     "hex",
//!     PropertyType::Primitive(PrimitiveKind::String),
//! ))?;
//! let red = builder.add_instance("Color", [("hex", Value::Str("#f00".into()))])?;
//! builder.export("red", red);
//! let program = builder.build();
//! assert_eq!(program.local_component_names.len(), 1);
//! # Ok::<(), motif_core::GraphError>(())
//! ```

pub mod errors;
pub mod graph;

pub use errors::GraphError;
pub use graph::{
    ComponentInstance, ComponentType, CompilerOptions, InstanceId, PrimitiveKind, Program,
    ProgramBuilder, PropertyType, Value,
};
