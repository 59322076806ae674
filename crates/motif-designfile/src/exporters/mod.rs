//! Exporter trait and registry.

pub mod sketch;

use crate::error::ExportError;
use std::path::Path;

/// Callback invoked with human-readable progress messages during export.
pub type ProgressReporter<'a> = &'a mut dyn FnMut(&str);

/// A design-file exporter.
pub trait Exporter {
    /// Whether this exporter can handle the given file: a pure extension
    /// and existence check, never a tool invocation.
    fn can_parse(&self, source: &Path) -> bool;

    /// Export vector assets from `source` into `out_dir`.
    ///
    /// Fails with [`ExportError::InvalidSourceFile`] when [`Exporter::can_parse`]
    /// rejects the source, before any external tool is invoked.
    fn export(
        &self,
        source: &Path,
        out_dir: &Path,
        progress: ProgressReporter,
    ) -> Result<(), ExportError>;
}

/// Registry of available exporters, consulted in registration order.
pub struct ExporterRegistry {
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            exporters: Vec::new(),
        }
    }

    /// Register an exporter.
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters.push(exporter);
    }

    /// The first exporter that can parse the given file, if any.
    pub fn exporter_for(&self, source: &Path) -> Option<&dyn Exporter> {
        self.exporters
            .iter()
            .find(|exporter| exporter.can_parse(source))
            .map(|exporter| exporter.as_ref())
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(sketch::SketchExporter::new()));
        registry
    }
}
