//! Error types for mp-jinja

use std::fmt;
use thiserror::Error;

/// Jinja templating errors
#[derive(Error, Debug)]
pub enum JinjaError {
    /// Template source failed to parse (J001)
    #[error("[J001] Template compile error in {source_file}: {message}")]
    CompileError {
        source_file: String,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for JinjaError
pub type JinjaResult<T> = Result<T, JinjaError>;

/// Why a render did not produce output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorKind {
    /// The requested internal name is not registered in the set
    NameNotFound,
    /// The template exists but failed while executing
    Execute,
}

impl fmt::Display for RenderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderErrorKind::NameNotFound => write!(f, "name not found"),
            RenderErrorKind::Execute => write!(f, "execute error"),
        }
    }
}

/// Failure to render a named template.
///
/// Carries the requested name and every name actually present in the set,
/// so a name mismatch reads differently from a data or logic problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    /// Internal name that was requested
    pub requested: String,
    /// Internal names defined in the set, in registration order
    pub available: Vec<String>,
    /// Failure class
    pub kind: RenderErrorKind,
    /// Underlying engine message
    pub message: String,
}

impl RenderError {
    /// Whether the requested name is simply absent from the set
    pub fn is_not_found(&self) -> bool {
        self.kind == RenderErrorKind::NameNotFound
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Template error ({}): {}\nRequested template: {}\nAvailable templates: [{}]",
            self.kind,
            self.message,
            self.requested,
            self.available.join(", ")
        )
    }
}

impl std::error::Error for RenderError {}
