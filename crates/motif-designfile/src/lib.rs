//! Design-file exporters.
//!
//! Upstream of compilation, design files (e.g. Sketch documents) are
//! exported to vector assets. Each exporter advertises the files it can
//! parse; the registry picks the first exporter that accepts a path.
//!
//! Exporters that shell out to platform design tools are platform-gated
//! and fail fast with a descriptive error on unsupported hosts, before any
//! tool discovery runs.

pub mod error;
pub mod exporters;
pub mod runner;

pub use error::ExportError;
pub use exporters::sketch::SketchExporter;
pub use exporters::{Exporter, ExporterRegistry};
pub use runner::{CommandRunner, ShellRunner};
