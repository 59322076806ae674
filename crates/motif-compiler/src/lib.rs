//! The target-compiler pipeline.
//!
//! This crate walks a [`motif_core::Program`] once, resolves every property
//! to a target-specific `{type, initializer, updatable}` triple, merges
//! per-component native bindings, detects singletons, and hands the
//! accumulated output to a target for package rendering.
//!
//! Targets implement the [`Target`] trait; the shared [`Compiler`] driver
//! depends only on that trait, never on a concrete target.
//!
//! # Example
//!
//! ```ignore
//! use motif_compiler::Compiler;
//! use motif_targets::web::WebTarget;
//!
//! let mut compiler = Compiler::new(WebTarget::new(), &program);
//! compiler.start(&program)?;
//! ```

pub mod binding;
pub mod error;
pub mod merge;
pub mod output;
pub mod package;
pub mod resolve;
pub mod spec;
pub mod target;
pub mod templates;

pub use binding::{AssetBinder, AssetContent, Binding, Dependency, PackageJson};
pub use error::{CompilerError, Result};
pub use merge::{merge_binding, merge_dependency};
pub use output::{Output, ProcessedComponent, StyleBuckets};
pub use package::output_template_package;
pub use resolve::resolve_root;
pub use spec::{TargetComponentSpec, TargetProperty};
pub use target::{Compiler, Target};
pub use templates::TemplateEngine;
