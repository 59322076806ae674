//! The target capability interface and the shared compilation driver.

use crate::binding::Binding;
use crate::error::Result;
use crate::output::Output;
use crate::resolve::resolve_root;
use crate::spec::{TargetComponentSpec, TargetProperty};
use motif_core::{PrimitiveKind, Program, Value};
use std::path::PathBuf;

/// Default port for the hot server when the driver does not pick one.
pub const DEFAULT_HOT_PORT: u16 = 8081;

/// Per-target capability interface.
///
/// Implemented once per target platform; the shared pipeline depends only
/// on this trait, never on a concrete target's identity.
pub trait Target {
    /// Validate driver options before any work happens.
    fn validate_options(&self, program: &Program) -> Result<()>;

    /// Resolve the host address the hot server binds.
    ///
    /// Invoked at most once per run, only on hot runs; never retried.
    fn hostname(&self) -> Result<String>;

    /// Name of the generated module or package.
    fn module_name(&self, output: &Output) -> String;

    /// Module specifier of the hot-reload companion component.
    fn hot_component(&self) -> &'static str;

    /// Destination root of the generated SDK package.
    fn sdk_root(&self, program: &Program) -> PathBuf;

    /// Seed a freshly cleared output, e.g. with core runtime sources.
    fn seed_output(&self, _output: &mut Output) {}

    /// Look up the native binding for a component type, if any.
    fn binding_for(&self, type_name: &str) -> Option<Binding>;

    /// Resolve one primitive property.
    ///
    /// Returns `None` for unrepresentable kinds; the caller omits the
    /// property and compilation degrades instead of aborting.
    fn get_primitive(&self, kind: PrimitiveKind, value: &Value) -> Option<TargetProperty>;

    /// Render the constructor-call initializer for a resolved spec.
    fn get_initializer(&self, spec: &TargetComponentSpec) -> String;

    /// Collapse a collection of same-typed resolved properties.
    ///
    /// `None` entries are unrepresentable elements; an empty collection
    /// yields no property.
    fn collect_component_properties(
        &self,
        properties: &[Option<TargetProperty>],
    ) -> Option<TargetProperty>;

    /// Human-readable instructions for consuming the generated package.
    fn usage_instructions(&self, program: &Program, output: &Output) -> String;

    /// Root directory for static assets in the generated package.
    fn static_root(&self, program: &Program, output: &Output) -> PathBuf;

    /// Materialize bound assets and target-specific static output.
    fn write_assets(&self, program: &Program, output: &mut Output) -> Result<()>;

    /// Render and materialize the full SDK package at the SDK root.
    fn write_sdk(&self, program: &Program, output: &mut Output) -> Result<()>;
}

/// The shared compilation driver.
///
/// Owns the per-run [`Output`] accumulator. A retained compiler may be
/// reused across hot-reload passes; [`Compiler::start`] clears the
/// accumulator at entry so partial state from an aborted run never leaks
/// into the next one. There is no cancellation: a run either completes or
/// fails, and callers wanting cancellation discard the instance.
pub struct Compiler<T: Target> {
    target: T,
    output: Output,
}

impl<T: Target> Compiler<T> {
    /// Create a compiler for one target and program.
    pub fn new(target: T, program: &Program) -> Self {
        let output = Output::new(target.sdk_root(program), program.project_name.clone());
        Self { target, output }
    }

    /// Run one full compilation pass, strictly ordered:
    /// reset, option validation, hot URL resolution (hot runs only), the
    /// resolver walk over every exported root, then asset emission (hot)
    /// or full package assembly (non-hot).
    pub fn start(&mut self, program: &Program) -> Result<()> {
        self.output.clear();
        self.target.seed_output(&mut self.output);
        self.target.validate_options(program)?;

        if program.hot {
            // The one network-touching operation; isolated here so its
            // failure cannot abort non-hot compilations.
            let hostname = self.target.hostname()?;
            let port = program.options.hot_port.unwrap_or(DEFAULT_HOT_PORT);
            self.output.hot_url = Some(format!("http://{hostname}:{port}"));
        }

        for id in program.local_component_names.values() {
            resolve_root(&self.target, program, *id, &mut self.output)?;
        }

        if program.hot {
            self.target.write_assets(program, &mut self.output)?;
        } else {
            self.target.write_sdk(program, &mut self.output)?;
            log::info!("{}", self.target.usage_instructions(program, &self.output));
        }

        Ok(())
    }

    /// The accumulated output of the most recent run.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// The active target.
    pub fn target(&self) -> &T {
        &self.target
    }
}
