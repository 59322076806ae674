//! Native bindings: target-specific augmentations attached to component types.

use crate::error::Result;
use indexmap::IndexMap;
use motif_core::{ComponentInstance, Program};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The subset of a dependency's package manifest the compiler cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name; the identity key for dependency merging.
    pub name: String,
    /// Version requirement rendered into the generated manifest.
    pub version: String,
}

/// A package dependency contributed by a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub package_json: PackageJson,
}

impl Dependency {
    /// Create a dependency from a name and version requirement.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_json: PackageJson {
                name: name.into(),
                version: version.into(),
            },
        }
    }
}

/// Content of one bound asset, materialized under the static root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetContent {
    /// Literal bytes to write.
    Contents(Vec<u8>),
    /// A file to copy from the project tree.
    CopyFrom(PathBuf),
}

/// Hook a binding may supply to bind per-instance assets into the output.
///
/// Invoked exactly once per distinct instance of the bound component type.
pub type AssetBinder =
    fn(&ComponentInstance, &Program, &mut IndexMap<String, AssetContent>) -> Result<()>;

/// A target-specific native augmentation for one component type.
///
/// Declared by target integrators, looked up by the compiler at the first
/// encounter of the component type, never mutated by it.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    /// Extra source files shipped with the generated package.
    pub sources: Vec<PathBuf>,
    /// Type-declaration files. When non-empty, these fully replace the
    /// generated declaration for the bound component.
    pub declarations: Vec<PathBuf>,
    /// Package dependencies the binding requires.
    pub dependencies: Vec<Dependency>,
    /// Optional per-instance asset hook.
    pub asset_binder: Option<AssetBinder>,
}

impl Binding {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source file.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Append a declaration file.
    pub fn with_declaration(mut self, declaration: impl Into<PathBuf>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    /// Append a dependency.
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Attach an asset binder.
    pub fn with_asset_binder(mut self, binder: AssetBinder) -> Self {
        self.asset_binder = Some(binder);
        self
    }
}
