//! Error types for the compiler pipeline.

use motif_core::GraphError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Errors that can occur while compiling a program into an SDK package.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Invalid template source.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// A template or skeleton file required for rendering is missing.
    /// Fatal for the run: no partial package is left in a valid state.
    #[error("Template not found: {0}")]
    MissingTemplate(PathBuf),

    /// Driver options failed target validation.
    #[error("Invalid compiler options: {0}")]
    InvalidOptions(String),

    /// Hostname resolution for the hot server failed.
    #[error("Unable to resolve hostname: {0}")]
    Hostname(String),

    /// An instance referenced a type absent from the program.
    #[error("Unknown component type: {0}")]
    UnknownComponent(String),

    /// Graph construction error surfaced through the compiler.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
