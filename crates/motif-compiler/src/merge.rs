//! Binding merge: folds a component's native binding into the output.

use crate::binding::{Binding, Dependency};
use crate::output::Output;
use indexmap::IndexMap;

/// Merge a dependency into the set, keyed by package name.
///
/// First write wins: a second dependency with the same name is silently
/// dropped, whatever its version.
// TODO: surface conflicts between same-named dependencies instead of dropping them.
pub fn merge_dependency(dependencies: &mut IndexMap<String, Dependency>, dependency: Dependency) {
    dependencies
        .entry(dependency.package_json.name.clone())
        .or_insert(dependency);
}

/// Fold a binding's contributions into the output.
///
/// Sources and declarations land in their ordered sets, so merging the same
/// binding twice is a no-op.
pub fn merge_binding(binding: &Binding, output: &mut Output) {
    for source in &binding.sources {
        output.sources.insert(source.clone());
    }

    for declaration in &binding.declarations {
        output.declarations.insert(declaration.clone());
    }

    for dependency in &binding.dependencies {
        merge_dependency(&mut output.dependencies, dependency.clone());
    }
}
