//! The per-run output accumulator.

use crate::binding::{AssetContent, Binding, Dependency};
use crate::spec::TargetComponentSpec;
use indexmap::{IndexMap, IndexSet};
use motif_core::InstanceId;
use std::path::PathBuf;

/// Compiler-owned record for one component type.
#[derive(Debug, Clone)]
pub struct ProcessedComponent {
    /// Resolved spec from a representative instance.
    pub spec: TargetComponentSpec,
    /// Every distinct instance of this type seen program-wide. The size
    /// feeds singleton detection.
    pub instances: IndexSet<InstanceId>,
    /// The active target's native binding for this type, if any.
    pub binding: Option<Binding>,
}

/// Style buckets populated by targets that emit style sheets.
#[derive(Debug, Clone, Default)]
pub struct StyleBuckets {
    /// Style variables: token name → initializer value.
    pub variables: IndexMap<String, String>,
    /// Rule groups: selector → declarations.
    pub rule_groups: IndexMap<String, IndexSet<String>>,
    /// Font groupings keyed by family.
    pub fonts: IndexMap<String, IndexSet<String>>,
}

impl StyleBuckets {
    fn clear(&mut self) {
        self.variables.clear();
        self.rule_groups.clear();
        self.fonts.clear();
    }
}

/// The single mutable accumulator for one compilation run.
///
/// All sets and mappings are insertion-ordered; iteration order reaches the
/// emitted package, so determinism depends on it. Created once per compiler
/// instance and reset with [`Output::clear`] before any reuse — hot-reload
/// passes must never observe state from an aborted previous run.
#[derive(Debug, Clone)]
pub struct Output {
    /// Destination root of the generated package.
    pub sdk_root: PathBuf,
    /// Logical project name.
    pub project_name: String,
    /// Base URL of the hot server, set only on hot runs.
    pub hot_url: Option<String>,
    /// Ordered, deduplicated source file paths.
    pub sources: IndexSet<PathBuf>,
    /// Ordered, deduplicated declaration file paths.
    pub declarations: IndexSet<PathBuf>,
    /// Import lines prepended to the generated declaration bundle.
    pub declaration_imports: IndexSet<String>,
    /// Dependencies keyed by package name; first write wins.
    pub dependencies: IndexMap<String, Dependency>,
    /// Processed components, in first-encounter order of the graph walk.
    pub processed_components: IndexMap<String, ProcessedComponent>,
    /// Bound assets: package-relative path → content.
    pub asset_bindings: IndexMap<String, AssetContent>,
    /// Style buckets, populated only by targets that use them.
    pub styles: StyleBuckets,
}

impl Output {
    /// Create a fresh, empty output bound to a package root and project name.
    pub fn new(sdk_root: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
            project_name: project_name.into(),
            hot_url: None,
            sources: IndexSet::new(),
            declarations: IndexSet::new(),
            declaration_imports: IndexSet::new(),
            dependencies: IndexMap::new(),
            processed_components: IndexMap::new(),
            asset_bindings: IndexMap::new(),
            styles: StyleBuckets::default(),
        }
    }

    /// Drop all accumulated state back to empty, preserving the package
    /// root and project name.
    pub fn clear(&mut self) {
        self.hot_url = None;
        self.sources.clear();
        self.declarations.clear();
        self.declaration_imports.clear();
        self.dependencies.clear();
        self.processed_components.clear();
        self.asset_bindings.clear();
        self.styles.clear();
    }

    /// Component types eligible for the singleton rewrite: instantiated
    /// exactly once program-wide and carrying no binding. A binding implies
    /// external semantics the rewrite must not assume away.
    pub fn singletons(&self) -> IndexSet<String> {
        self.processed_components
            .iter()
            .filter(|(_, component)| component.instances.len() == 1 && component.binding.is_none())
            .map(|(name, _)| name.clone())
            .collect()
    }
}
