//! Error types for design-file export.

use thiserror::Error;

/// Errors that can occur while exporting a design file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The source file does not exist or is not parseable by this exporter.
    #[error("Invalid source file.")]
    InvalidSourceFile,

    /// The exporter's platform tool is unavailable on this host OS.
    /// Raised before any tool invocation is attempted.
    #[error("This exporter is not supported on the current host: {platform}")]
    UnsupportedHost { platform: String },

    /// Tool discovery found no installation of the design tool.
    #[error("Design tool installation not found.")]
    ToolNotInstalled,

    /// The underlying tool failed; its own error message is preserved.
    #[error("Export tool invocation failed: {0}")]
    Tool(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
